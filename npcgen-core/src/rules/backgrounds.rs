//! Backgrounds for player-character mode: personality traits, ideals, bonds
//! and flaws to draw from.

use crate::rules::races::owned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub ideals: Vec<String>,
    #[serde(default)]
    pub bonds: Vec<String>,
    #[serde(default)]
    pub flaws: Vec<String>,
}

impl BackgroundDefinition {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_lowercase(),
            name: name.to_string(),
            personality_traits: Vec::new(),
            ideals: Vec::new(),
            bonds: Vec::new(),
            flaws: Vec::new(),
        }
    }

    fn with_traits(mut self, traits: &[&str]) -> Self {
        self.personality_traits = owned(traits);
        self
    }

    fn with_ideals(mut self, ideals: &[&str]) -> Self {
        self.ideals = owned(ideals);
        self
    }

    fn with_bonds(mut self, bonds: &[&str]) -> Self {
        self.bonds = owned(bonds);
        self
    }

    fn with_flaws(mut self, flaws: &[&str]) -> Self {
        self.flaws = owned(flaws);
        self
    }
}

/// The built-in background table.
pub fn standard_backgrounds() -> Vec<BackgroundDefinition> {
    vec![
        BackgroundDefinition::new("acolyte", "Acolyte")
            .with_traits(&[
                "I idolize a particular hero of my faith and constantly refer to their deeds.",
                "I quote sacred texts and proverbs in almost every situation.",
                "I am tolerant of other faiths and respect the worship of other gods.",
            ])
            .with_ideals(&[
                "Tradition. The ancient traditions of worship must be preserved.",
                "Charity. I always try to help those in need, no matter the cost.",
                "Faith. I trust that my deity will guide my actions.",
            ])
            .with_bonds(&[
                "I would die to recover an ancient relic of my faith.",
                "I owe my life to the priest who took me in when my parents died.",
                "Everything I do is for the common people.",
            ])
            .with_flaws(&[
                "I judge others harshly, and myself even more severely.",
                "I am inflexible in my thinking.",
                "I put too much trust in those who wield power within my temple.",
            ]),
        BackgroundDefinition::new("criminal", "Criminal")
            .with_traits(&[
                "I always have a plan for what to do when things go wrong.",
                "I am always calm, no matter the situation.",
                "The first thing I do in a new place is note the locations of everything valuable.",
            ])
            .with_ideals(&[
                "Honor. I don't steal from others in the trade.",
                "Freedom. Chains are meant to be broken.",
                "Greed. I will do whatever it takes to become wealthy.",
            ])
            .with_bonds(&[
                "I'm trying to pay off an old debt I owe to a generous benefactor.",
                "My ill-gotten gains go to support my family.",
                "Someone I loved died because of a mistake I made.",
            ])
            .with_flaws(&[
                "When I see something valuable, I can't think about anything but how to steal it.",
                "I turn tail and run when things look bad.",
                "An innocent person is in prison for a crime that I committed.",
            ]),
        BackgroundDefinition::new("folk_hero", "Folk Hero")
            .with_traits(&[
                "I judge people by their actions, not their words.",
                "If someone is in trouble, I'm always ready to lend help.",
                "I have a strong sense of fair play.",
            ])
            .with_ideals(&[
                "Respect. People deserve to be treated with dignity.",
                "Fairness. No one should get preferential treatment before the law.",
                "Destiny. Nothing and no one can steer me away from my higher calling.",
            ])
            .with_bonds(&[
                "I have a family, but I have no idea where they are.",
                "I protect those who cannot protect themselves.",
                "I wish my childhood sweetheart had come with me to pursue my destiny.",
            ])
            .with_flaws(&[
                "I'm convinced of the significance of my destiny.",
                "I have a weakness for the vices of the city.",
                "Secretly, I believe that things would be better if I were a tyrant.",
            ]),
        BackgroundDefinition::new("noble", "Noble")
            .with_traits(&[
                "My eloquent flattery makes everyone I talk to feel important.",
                "The common folk love me for my kindness and generosity.",
                "I take great pains to always look my best.",
            ])
            .with_ideals(&[
                "Responsibility. It is my duty to respect the authority of those above me.",
                "Noble Obligation. It is my duty to protect and care for the people beneath me.",
                "Power. If I can attain more power, no one will tell me what to do.",
            ])
            .with_bonds(&[
                "I will face any challenge to win the approval of my family.",
                "My house's alliance with another noble family must be sustained.",
                "Nothing is more important than the other members of my family.",
            ])
            .with_flaws(&[
                "I secretly believe that everyone is beneath me.",
                "I hide a truly scandalous secret that could ruin my family forever.",
                "I too often hear veiled insults and threats in every word addressed to me.",
            ]),
        BackgroundDefinition::new("sage", "Sage")
            .with_traits(&[
                "I use polysyllabic words that convey the impression of great erudition.",
                "I've read every book in the world's greatest libraries.",
                "I'm used to helping out those who aren't as smart as I am.",
            ])
            .with_ideals(&[
                "Knowledge. The path to power and self-improvement is through knowledge.",
                "Beauty. What is beautiful points us beyond itself toward what is true.",
                "Logic. Emotions must not cloud our logical thinking.",
            ])
            .with_bonds(&[
                "It is my duty to protect my students.",
                "I have an ancient text that holds terrible secrets that must not fall into the wrong hands.",
                "I've been searching my whole life for the answer to a certain question.",
            ])
            .with_flaws(&[
                "I am easily distracted by the promise of information.",
                "I speak without really thinking through my words.",
                "I can't keep a secret to save my life, or anyone else's.",
            ]),
        BackgroundDefinition::new("soldier", "Soldier")
            .with_traits(&[
                "I'm always polite and respectful.",
                "I'm haunted by memories of war.",
                "I can stare down a hell hound without flinching.",
            ])
            .with_ideals(&[
                "Greater Good. Our lot is to lay down our lives in defense of others.",
                "Responsibility. I do what I must and obey just authority.",
                "Live and Let Live. Ideals aren't worth killing over or going to war for.",
            ])
            .with_bonds(&[
                "I would still lay down my life for the people I served with.",
                "Someone saved my life on the battlefield. To this day, I will never leave a friend behind.",
                "My honor is my life.",
            ])
            .with_flaws(&[
                "The monstrous enemy we faced in battle still leaves me quivering with fear.",
                "I have little respect for anyone who is not a proven warrior.",
                "I obey the law, even if the law causes misery.",
            ]),
        BackgroundDefinition::new("entertainer", "Entertainer")
            .with_traits(&[
                "I know a story relevant to almost every situation.",
                "I love a good insult, even one directed at me.",
                "I get bitter if I'm not the center of attention.",
            ])
            .with_ideals(&[
                "Creativity. The world is in need of new ideas and bold action.",
                "People. I like seeing the smiles on people's faces when I perform.",
                "Honesty. Art should reflect the soul.",
            ])
            .with_bonds(&[
                "My instrument is my most treasured possession.",
                "I want to be famous, whatever it takes.",
                "I will do anything to prove myself superior to my hated rival.",
            ])
            .with_flaws(&[
                "I'll do anything to win fame and renown.",
                "I'm a sucker for a pretty face.",
                "I have trouble keeping my true feelings hidden.",
            ]),
        BackgroundDefinition::new("outlander", "Outlander")
            .with_traits(&[
                "I'm driven by a wanderlust that led me away from home.",
                "I watch over my friends as if they were a litter of newborn pups.",
                "I feel far more comfortable around animals than people.",
            ])
            .with_ideals(&[
                "Change. Life is like the seasons, in constant change.",
                "Nature. The natural world is more important than all the constructs of civilization.",
                "Glory. I must earn glory in battle, for myself and my clan.",
            ])
            .with_bonds(&[
                "My family, clan, or tribe is the most important thing in my life.",
                "An injury to the unspoiled wilderness of my home is an injury to me.",
                "I suffer awful visions of a coming disaster and will do anything to prevent it.",
            ])
            .with_flaws(&[
                "I am too enamored of ale, wine, and other intoxicants.",
                "There's no room for caution in a life lived to the fullest.",
                "Violence is my answer to almost any challenge.",
            ]),
    ]
}

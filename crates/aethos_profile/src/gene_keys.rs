//! Gene Keys: the Shadow, Gift and Siddhi frequency bands of each gate.
//!
//! Keys correspond one-to-one with Human Design gates, so a key is only ever
//! looked up by gate number. Longitudes must go through a [`GateWheel`]
//! first.
//!
//! [`GateWheel`]: crate::human_design::GateWheel

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ProfileError;
use crate::human_design::Activation;

/// One Gene Key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeneKey {
    pub gate: u8,
    pub shadow: &'static str,
    pub gift: &'static str,
    pub siddhi: &'static str,
}

/// (shadow, gift, siddhi) indexed by gate - 1.
///
/// Some words repeat across bands (30: Desire, Desire, Rapture).
const GENE_KEYS: [(&str, &str, &str); 64] = [
    ("Entropy", "Freshness", "Beauty"), // 1
    ("Dislocation", "Orientation", "Unity"), // 2
    ("Chaos", "Innovation", "Innocence"), // 3
    ("Intolerance", "Understanding", "Forgiveness"), // 4
    ("Impatience", "Patience", "Timelessness"), // 5
    ("Conflict", "Diplomacy", "Peace"), // 6
    ("Division", "Guidance", "Virtue"), // 7
    ("Mediocrity", "Style", "Exquisiteness"), // 8
    ("Inertia", "Determination", "Invincibility"), // 9
    ("Self-Obsession", "Naturalness", "Being"), // 10
    ("Obscurity", "Idealism", "Light"), // 11
    ("Vanity", "Discrimination", "Purity"), // 12
    ("Discord", "Discernment", "Empathy"), // 13
    ("Compromise", "Competence", "Bounteousness"), // 14
    ("Dullness", "Magnetism", "Florescence"), // 15
    ("Indifference", "Versatility", "Mastery"), // 16
    ("Opinion", "Far-sightedness", "Omniscience"), // 17
    ("Judgment", "Integrity", "Perfection"), // 18
    ("Co-dependence", "Sensitivity", "Sacrifice"), // 19
    ("Superficiality", "Self-Assurance", "Presence"), // 20
    ("Control", "Authority", "Valor"), // 21
    ("Dishonor", "Graciousness", "Grace"), // 22
    ("Complexity", "Simplicity", "Quintessence"), // 23
    ("Addiction", "Invention", "Silence"), // 24
    ("Constriction", "Acceptance", "Universal Love"), // 25
    ("Pride", "Artfulness", "Invisibility"), // 26
    ("Selfishness", "Altruism", "Selflessness"), // 27
    ("Purposelessness", "Totality", "Immortality"), // 28
    ("Half-heartedness", "Commitment", "Devotion"), // 29
    ("Desire", "Desire", "Rapture"), // 30
    ("Arrogance", "Leadership", "Humility"), // 31
    ("Failure", "Preservation", "Veneration"), // 32
    ("Forgetting", "Mindfulness", "Revelation"), // 33
    ("Force", "Strength", "Majesty"), // 34
    ("Hunger", "Adventure", "Boundlessness"), // 35
    ("Turbulence", "Humanity", "Compassion"), // 36
    ("Weakness", "Equality", "Tenderness"), // 37
    ("Struggle", "Perseverance", "Honor"), // 38
    ("Provocation", "Dynamism", "Liberation"), // 39
    ("Exhaustion", "Resolve", "Divine Will"), // 40
    ("Fantasy", "Anticipation", "Emanation"), // 41
    ("Expectation", "Detachment", "Celebration"), // 42
    ("Deafness", "Insight", "Epiphany"), // 43
    ("Interference", "Synergy", "Teamwork"), // 44
    ("Dominance", "Synergy", "Communion"), // 45
    ("Seriousness", "Delight", "Ecstasy"), // 46
    ("Oppression", "Transmutation", "Transfiguration"), // 47
    ("Inadequacy", "Resourcefulness", "Wisdom"), // 48
    ("Reaction", "Revolution", "Rebirth"), // 49
    ("Corruption", "Equilibrium", "Harmony"), // 50
    ("Agitation", "Initiative", "Awakening"), // 51
    ("Stress", "Restraint", "Stillness"), // 52
    ("Immaturity", "Expansion", "Superabundance"), // 53
    ("Greed", "Aspiration", "Ascension"), // 54
    ("Victimization", "Freedom", "Freedom"), // 55
    ("Distraction", "Enrichment", "Intoxication"), // 56
    ("Unease", "Intuition", "Clarity"), // 57
    ("Dissatisfaction", "Vitality", "Bliss"), // 58
    ("Dishonesty", "Intimacy", "Transparency"), // 59
    ("Limitation", "Realism", "Justice"), // 60
    ("Psychosis", "Inspiration", "Sanctity"), // 61
    ("Intellect", "Precision", "Impeccability"), // 62
    ("Doubt", "Inquiry", "Truth"), // 63
    ("Confusion", "Imagination", "Illumination"), // 64
];

/// Look up the Gene Key for `gate` (1..=64).
pub fn gene_key(gate: u8) -> Result<GeneKey, ProfileError> {
    let (shadow, gift, siddhi) = *gate
        .checked_sub(1)
        .and_then(|i| GENE_KEYS.get(usize::from(i)))
        .ok_or(ProfileError::InvalidGate(gate))?;
    Ok(GeneKey {
        gate,
        shadow,
        gift,
        siddhi,
    })
}

/// Map every activation to its Gene Key, keyed as the input.
///
/// Returns a new map; the activations are left untouched.
pub fn gene_keys_layer<K: Ord + Clone>(
    activations: &BTreeMap<K, Activation>,
) -> Result<BTreeMap<K, GeneKey>, ProfileError> {
    activations
        .iter()
        .map(|(k, a)| Ok((k.clone(), gene_key(a.gate)?)))
        .collect()
}

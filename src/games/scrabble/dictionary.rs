//! Word list with deterministic iteration order and fast membership checks.

use rustc_hash::FxHashSet;

use super::board::BOARD_SIZE;

/// Letter counts of a word or a pool of tiles, indexed `A..=Z`. Counts saturate at
/// `u8::MAX`.
pub type LetterCounts = [u8; 26];

pub fn letter_counts<I: IntoIterator<Item = char>>(letters: I) -> LetterCounts {
    let mut counts: LetterCounts = [0; 26];
    for letter in letters {
        if letter.is_ascii_uppercase() {
            let count = &mut counts[(letter as u8 - b'A') as usize];
            *count = count.saturating_add(1);
        }
    }
    counts
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub word: String,
    pub counts: LetterCounts,
}

impl Entry {
    /// True when the word can be spelled from `available` letters plus `blanks` wildcards.
    pub fn fits(&self, available: &LetterCounts, blanks: u8) -> bool {
        let missing: u32 = self
            .counts
            .iter()
            .zip(available.iter())
            .map(|(&needed, &have)| needed.saturating_sub(have) as u32)
            .sum();
        missing <= blanks as u32
    }
}

/// Valid words, uppercase, sorted and deduplicated.
#[derive(Clone, Debug)]
pub struct Dictionary {
    entries: Vec<Entry>,
    lookup: FxHashSet<String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::from_words(STANDARD_WORDS.iter())
    }
}

impl Dictionary {
    /// Builds a dictionary, keeping only words of 2 to 15 letters `A` to `Z`. Lowercase input
    /// is uppercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_ascii_uppercase())
            .filter(|word| {
                (2..=BOARD_SIZE).contains(&word.len())
                    && word.chars().all(|c| c.is_ascii_uppercase())
            })
            .collect();
        words.sort();
        words.dedup();

        let lookup = words.iter().cloned().collect();
        let entries = words
            .into_iter()
            .map(|word| Entry {
                counts: letter_counts(word.chars()),
                word,
            })
            .collect();

        Self { entries, lookup }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A small French word list of common 2 to 7 letter words.
pub const STANDARD_WORDS: &[&str] = &[
    "AA", "AH", "AI", "AN", "AS", "AU", "AY", "BA", "BE", "BI", "BU", "CA", "CE", "CI", "DA",
    "DE", "DO", "DU", "EH", "EN", "ES", "ET", "EU", "EX", "FA", "FI", "GO", "HA", "HE", "HI",
    "HO", "IF", "IL", "IN", "JE", "KA", "LA", "LE", "LI", "LU", "MA", "ME", "MI", "MU", "NA",
    "NE", "NI", "NO", "NU", "OC", "OH", "ON", "OR", "OS", "OU", "PI", "PU", "QI", "RA", "RE",
    "RI", "RU", "SA", "SE", "SI", "SU", "TA", "TE", "TU", "UN", "US", "UT", "VA", "VU", "WU",
    "XI", "AIE", "AIL", "AIR", "AME", "AMI", "ANE", "ANS", "ARC", "ARE", "ART", "BAL", "BAS",
    "BAT", "BEC", "BEL", "BEN", "BIS", "BLE", "BOA", "BOL", "BON", "BUS", "BUT", "CAP", "CAR",
    "CAS", "CEP", "CES", "CLE", "COL", "COQ", "COR", "COU", "CRI", "CRU", "CUL", "DES", "DIX",
    "DON", "DOS", "DUC", "DUR", "EAU", "ECU", "ELU", "ERE", "EST", "ETE", "EUX", "FAN", "FAR",
    "FAX", "FEE", "FER", "FEU", "FIL", "FIN", "FIS", "FIT", "FOI", "FOU", "FUR", "GAI", "GAL",
    "GAZ", "GEL", "GIT", "GUI", "ICI", "ILE", "JET", "JEU", "JUS", "KIT", "LAC", "LAS", "LAV",
    "LES", "LIT", "LOI", "LOU", "LUI", "LUX", "MAI", "MAL", "MAS", "MAT", "MAX", "MER", "MES",
    "MET", "MIE", "MIS", "MOI", "MOT", "MOU", "MUR", "MUS", "NET", "NEZ", "NID", "NON", "NOS",
    "NUE", "NUI", "NUL", "NUS", "OIE", "OUI", "OUR", "PAN", "PAR", "PAS", "PAT", "PAU", "PEU",
    "PIE", "PIN", "PLI", "POT", "PRE", "PRI", "PUA", "PUB", "PUR", "QUE", "QUI", "RAI", "RAS",
    "RAT", "RAZ", "RIS", "RIT", "RIZ", "ROC", "ROI", "RUE", "RUS", "RUT", "SAC", "SEC", "SEL",
    "SES", "SKI", "SOI", "SOL", "SON", "SOU", "SUA", "SUD", "SUR", "SUS", "TAC", "TAS", "TEL",
    "TES", "THE", "TIC", "TIR", "TOI", "TON", "TOP", "TOT", "TRI", "TUE", "UNE", "UNI", "UNS",
    "URE", "USA", "VAN", "VAS", "VAU", "VER", "VIA", "VIE", "VIF", "VIN", "VIS", "VIT", "VOL",
    "VOS", "VUE", "VUS", "ZEN", "ZOO", "AIDE", "AILE", "AINE", "AIRE", "AISE", "AMER", "AMIE",
    "ANGE", "ANIS", "ARME", "AUBE", "AVEC", "AVIS", "BAIN", "BEAU", "BIEN", "BLEU", "BOIS",
    "BOUT", "BRAS", "CAFE", "CAGE", "CALME", "CAMP", "CANE", "CAPE", "CASE", "CAVE", "CECI",
    "CELA", "CENT", "CEUX", "CHAT", "CHER", "CHEZ", "CIEL", "CINQ", "CITE", "CLEF", "COIN",
    "COLE", "COMA", "CONE", "COTE", "COUP", "COUR", "DAME", "DANS", "DATE", "DEJA", "DEUX",
    "DIEU", "DIRE", "DOIT", "DONC", "DONT", "DOUX", "DRAP", "DURE", "EAUX", "ELLE", "ELLES",
    "ENCORE", "ENTRE", "ETAIT", "ETAT", "ETRE", "FACE", "FAIT", "FAIM", "FAIS", "FAUT", "FAUX",
    "FETE", "FILE", "FILS", "FINE", "FOIS", "FOND", "FONT", "FORT", "FOUT", "GARE", "GARS",
    "GENS", "GOUT", "GRIS", "GROS", "HAUT", "HERBE", "HEURE", "HIER", "HOMME", "IDEE", "ILES",
    "IMAGE", "JAMBE", "JEAN", "JEUX", "JOIE", "JOUE", "JOUR", "JUGE", "JUPE", "JURE", "JUSTE",
    "KILO", "LAIT", "LAME", "LARD", "LAVE", "LEUR", "LIEU", "LIGNE", "LIRE", "LISTE", "LIVRE",
    "LOIN", "LONG", "LORS", "LOUP", "LUNE", "LUXE", "MAGE", "MAIN", "MAIS", "MALE", "MARE",
    "MARS", "MAUX", "MERE", "MIDI", "MIEN", "MIEUX", "MISE", "MODE", "MOIS", "MONDE", "MONT",
    "MORT", "MOTS", "MULE", "MURS", "NAGE", "NERF", "NEUF", "NOEL", "NOIR", "NOMS", "NORD",
    "NOTE", "NOUS", "NUIT", "ONDE", "PAGE", "PAIE", "PAIN", "PAIX", "PAPA", "PARC", "PART",
    "PAYS", "PEAU", "PERE", "PEUT", "PEUR", "PIED", "PILE", "PIPE", "PIRE", "PLAN", "PLUS",
    "PNEU", "POIL", "POIS", "PONT", "PORC", "PORT", "POSE", "POUR", "PRES", "PRET", "PRIX",
    "QUAI", "QUEL", "QUOI", "RACE", "RAGE", "RAID", "RANG", "RARE", "RAVE", "RAVI", "RAYON",
    "REEL", "REIN", "REND", "RESTE", "REVE", "RIEN", "RIRE", "RIVE", "ROBE", "ROLE", "ROND",
    "ROSE", "ROUE", "RUDE", "SAGE", "SAIN", "SALE", "SANG", "SANS", "SAUF", "SAUT", "SEIN",
    "SENS", "SEPT", "SEUL", "SIEN", "SITE", "SOIE", "SOIR", "SOLE", "SOMME", "SONT", "SORT",
    "SOUS", "STOP", "SUIS", "SUJET", "SURE", "TACT", "TANT", "TARD", "TAUX", "TAXE", "TELS",
    "TEMPS", "TENIR", "TENU", "TERRE", "TETE", "TIEN", "TIENT", "TIGE", "TIRE", "TOIT", "TOUS",
    "TOUT", "TRAM", "TRES", "TROP", "TROU", "TRUE", "TUBE", "TYPE", "UNIT", "VAIN", "VEAU",
    "VENT", "VERS", "VIDE", "VIEUX", "VILE", "VILLE", "VITE", "VOIE", "VOIR", "VOIX", "VOTE",
    "VOUS", "VRAI", "YEUX", "ZERO", "ZONE",
];

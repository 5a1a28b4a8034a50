// Study rewards
pub const XP_PER_MINUTE: u64 = 10;
pub const GOLD_PER_MINUTE: u64 = 5;
pub const CLASS_AFFINITY_BONUS: f64 = 0.10;
pub const REST_TOKEN_MINUTES: u64 = 60;

// XP and leveling
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_XP_THRESHOLD: u64 = 1000;
pub const XP_THRESHOLD_GROWTH: f64 = 1.5;
pub const STAT_POINTS_PER_LEVEL: u32 = 3;

// Character stats
pub const BASE_STAT_VALUE: u32 = 5;
pub const NUM_STATS: usize = 3;

// Study timer
pub const MIN_TIMER_MINUTES: u32 = 5;
pub const MAX_TIMER_MINUTES: u32 = 180;
pub const MIN_EARLY_STOP_SECONDS: u64 = 10 * 60;
/// Credited when a stored session has lost its subject label.
pub const FALLBACK_SUBJECT: &str = "General Study";

// Economy
pub const GACHA_COST: u64 = 50;
pub const SELL_PRICE: u64 = 20;

// Consumables
pub const REST_TOKEN: &str = "Rest Token";
pub const FOCUS_POTION: &str = "Focus Potion";
pub const FREE_TIME_PASS: &str = "Free Time Pass";

// Boss raid
pub const BOSS_NAME: &str = "Dread Examiner";
pub const BOSS_ATTACK: u32 = 20;
pub const BOSS_DEFENSE: u32 = 20;
pub const BOSS_TROPHY: &str = "Examiner's Sigil";
pub const BOSS_TROPHY_INTELLIGENCE: u32 = 2;

// Persistence
pub const SAVE_DIR_NAME: &str = ".cerebria";
pub const SAVE_FILE_NAME: &str = "profile.json";
pub const SAVE_DIR_ENV: &str = "CEREBRIA_HOME";
pub const MAX_NAME_LENGTH: usize = 24;

/// Subjects offered before the player has logged any custom ones.
pub const DEFAULT_SUBJECTS: [&str; 6] = [
    "Campbell Biology",
    "AMC Math",
    "AP Seminar",
    "Pre-calculus",
    "NMSQT",
    "Psychology",
];

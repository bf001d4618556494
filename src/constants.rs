/// Application constants

// Network defaults (GenLayer Studio)
pub const DEFAULT_GENLAYER_RPC_URL: &str = "https://studio.genlayer.com/api";
pub const DEFAULT_GENLAYER_CHAIN_ID: &str = "0xf22f"; // 61999
pub const DEFAULT_IMGBB_API_URL: &str = "https://api.imgbb.com";
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// JSON-RPC methods
pub const RPC_METHOD_READ: &str = "gen_call";
pub const RPC_METHOD_WRITE: &str = "eth_sendTransaction";
pub const RPC_METHOD_CHAIN_ID: &str = "eth_chainId";

// Reconciliation policy defaults
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 6;
pub const DEFAULT_POLL_HISTORY_WINDOW: u32 = 3;
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

// Page sizes used by the views
pub const HISTORY_PAGE_LIMIT: u32 = 10;
pub const LEADERBOARD_PAGE_LIMIT: u32 = 10;
pub const RECENT_PAGE_LIMIT: u32 = 10;

// Caps enforced by the contract
pub const CONTRACT_MAX_CHALLENGE_LIMIT: u32 = 50;
pub const CONTRACT_MAX_LEADERBOARD_LIMIT: u32 = 100;
pub const MIN_IMAGE_URL_LEN: usize = 10;
pub const MIN_ANIMAL_NAME_LEN: usize = 2;

// Upload
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

// AI guess markers and placeholders
pub const AI_ERROR_MARKERS: [&str; 2] = ["error:", "timeout"];
pub const AI_GUESS_PENDING: &str = "Processing...";
pub const AI_GUESS_FAILED_DISPLAY: &str = "Image loading failed";
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";
pub const AI_ERROR_HINT: &str = "AI couldn't load the image. Try using a direct image URL (ending in .jpg or .png) instead of file upload.";
pub const STILL_PROCESSING_MESSAGE: &str =
    "Challenge submitted! AI is still processing. Check Recent Games in a moment.";
pub const UPLOAD_FAILED_MESSAGE: &str =
    "Failed to upload image. Please try using a direct URL instead.";

// API version
pub const API_VERSION: &str = "v1";

pub mod markdown;
pub mod mic;
pub mod sidebar;
pub mod toast;

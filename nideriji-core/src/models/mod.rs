mod diary;
mod user;

pub use diary::DiaryEntry;
pub use user::{PairedUserProfile, UserProfile};

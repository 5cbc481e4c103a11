pub mod diary;
pub mod reminder;
pub mod routine;
pub mod setting;
pub mod tracker;

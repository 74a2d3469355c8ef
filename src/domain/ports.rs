use crate::domain::model::LibraryLimits;

pub trait SettingsProvider {
    fn data_dir(&self) -> &str;
    fn books_file(&self) -> &str;
    fn users_file(&self) -> &str;
    fn limits(&self) -> LibraryLimits;
    fn top_k(&self) -> usize;
}

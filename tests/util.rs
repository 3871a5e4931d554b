#[path = "util/file_size.rs"]
mod file_size;

pub mod folder_upload;
pub mod records;
pub mod storage;

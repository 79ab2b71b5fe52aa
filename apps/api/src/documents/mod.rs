// Document upload: text extraction plus optional archiving of the original file.

pub mod archive;
pub mod extractor;
pub mod handlers;

//! Built-in filesystem tools

pub mod list_files;
pub mod make_directory;
pub mod read_file;
pub mod read_multiple_files;
pub mod replace_content;
pub mod search_files;
pub mod write_file;

pub use list_files::{ListFilesTool, ListFilesToolFactory};
pub use make_directory::{MakeDirectoryTool, MakeDirectoryToolFactory};
pub use read_file::{ReadFileTool, ReadFileToolFactory};
pub use read_multiple_files::{ReadMultipleFilesTool, ReadMultipleFilesToolFactory};
pub use replace_content::{ReplaceContentTool, ReplaceContentToolFactory};
pub use search_files::{SearchFilesTool, SearchFilesToolFactory};
pub use write_file::{WriteFileTool, WriteFileToolFactory};

mod ffmpeg_locator;
mod ffprobe_info;
mod path_validator;
mod video_scanner;

pub use ffmpeg_locator::{locate, locate_ffmpeg, locate_ffprobe};
pub use ffprobe_info::{VideoInfo, count_video_frames, get_video_info};
pub use path_validator::{
    ensure_directory_exists, ensure_parent_directory, validate_directory_exists,
    validate_input_file,
};
pub use video_scanner::{VideoFileInfo, scan_video_files};

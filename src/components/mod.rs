//! UI Components
//!
//! Pages and the pieces they are built from.

mod config_missing;
mod landing;
mod login_form;
mod dashboard;
mod vision_detail;
mod new_task_form;
mod task_row;
mod progress_bar;
mod image_gallery;
mod delete_confirm_button;

pub use config_missing::ConfigMissing;
pub use landing::Landing;
pub use login_form::LoginForm;
pub use dashboard::Dashboard;
pub use vision_detail::VisionDetail;
pub use new_task_form::NewTaskForm;
pub use task_row::TaskRow;
pub use progress_bar::ProgressBar;
pub use image_gallery::{ImageGallery, ImagePreview};
pub use delete_confirm_button::DeleteConfirmButton;

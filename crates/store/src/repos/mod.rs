//! Repository traits grouped by area.

pub mod arrays;
pub mod history;
pub mod users;

pub use arrays::ArrayRepo;
pub use history::HistoryRepo;
pub use users::UserRepo;

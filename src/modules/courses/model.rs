pub use coursebook_models::courses::{
    Course, CourseChanges, CourseWithOwner, CreateCourseDto, NewCourse, UpdateCourseDto,
};
pub use coursebook_models::ids::CourseId;

pub const NO_COURSES: &str = "there are currently no courses";
pub const REQUESTED_NOT_FOUND: &str = "requested course not found";
pub const INDICATED_NOT_FOUND: &str = "indicated course not found";
pub const TITLE_AND_DESCRIPTION_NEEDED: &str = "both title and description needed";

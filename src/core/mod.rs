pub mod directory;
pub mod seed;

pub use crate::domain::model::{
    Course, CourseId, Instructor, Member, NewCourse, NewInstructor, NewStudent, Person, PersonId,
    Role, SignInAck, Student,
};
pub use crate::domain::ports::{ConfigProvider, DisplayInfo, SignIn};
pub use crate::utils::error::Result;
pub use directory::{Directory, DirectoryState, DirectorySummary, IdAllocator};

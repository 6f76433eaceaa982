//! 实体别名导出

pub use super::group_students::{
    ActiveModel as GroupStudentActiveModel, Entity as GroupStudents, Model as GroupStudentModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::lesson_participants::{
    ActiveModel as LessonParticipantActiveModel, Entity as LessonParticipants,
    Model as LessonParticipantModel,
};
pub use super::lessons::{
    ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel,
};
pub use super::parent_students::{
    ActiveModel as ParentStudentActiveModel, Entity as ParentStudents,
    Model as ParentStudentModel,
};
pub use super::teacher_students::{
    ActiveModel as TeacherStudentActiveModel, Entity as TeacherStudents,
    Model as TeacherStudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};

pub use super::category::Entity as Category;
pub use super::category_closure::Entity as CategoryClosure;
pub use super::course::Entity as Course;
pub use super::lesson::Entity as Lesson;
pub use super::payment_event::Entity as PaymentEvent;
pub use super::purchase::Entity as Purchase;
pub use super::section::Entity as Section;
pub use super::user::Entity as User;

pub use super::donations::Entity as Donations;
pub use super::events::Entity as Events;
pub use super::users::Entity as Users;

pub use coursebook_models::users::{CreateUserDto, NewUser, PublicUser};

use coursebook_models::NewUser;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};

/// Generates `count` users sharing one password hash.
pub fn generate_users(count: usize, password_hash: &str) -> Vec<NewUser> {
    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email_address = format!(
                "{}.{}+{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                idx
            );
            NewUser {
                first_name,
                last_name,
                email_address,
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

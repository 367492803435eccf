use crate::domain::customer::CustomerProfile;
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;

pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn profile(&self, user_email: &str) -> Result<Option<CustomerProfile>, DomainError> {
        self.repo.profile(user_email)
    }

    pub fn save_profile(
        &self,
        user_email: &str,
        profile: CustomerProfile,
    ) -> Result<(), DomainError> {
        if profile.name.trim().is_empty() {
            return Err(DomainError::invalid("name is required"));
        }
        self.repo.save_profile(user_email, profile)
    }
}

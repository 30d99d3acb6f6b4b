// File: inklined-common/src/traits/mod.rs

pub mod notifier_traits;
pub mod payment_traits;
pub mod repository_traits;

pub use notifier_traits::Notifier;
pub use payment_traits::StripeApi;
pub use repository_traits::SupporterRepository;

pub use notifier_traits::MockNotifier;
pub use payment_traits::MockStripeApi;
pub use repository_traits::MockSupporterRepository;

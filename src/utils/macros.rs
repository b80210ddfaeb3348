/// Implements [`Status`](crate::models::Status) for a result type that embeds
/// a [`RequestStatus`](crate::models::RequestStatus) in a field named `base`.
#[macro_export]
#[doc(hidden)]
macro_rules! impl_status {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::models::Status for $t {
                fn request_status(&self) -> &$crate::models::RequestStatus {
                    &self.base
                }
            }
        )+
    };
}

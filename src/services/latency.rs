use std::time::Duration;

/// Artificial delays applied before store operations, modelling a remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub delete_by_property_id: Duration,
    pub is_saved: Duration,
}

impl Latency {
    /// No delay at all; the default for tests and tools.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every operation takes the same time.
    pub fn uniform(ms: u64) -> Self {
        let d = Duration::from_millis(ms);
        Self {
            get_all: d,
            get_by_id: d,
            create: d,
            update: d,
            delete: d,
            delete_by_property_id: d,
            is_saved: d,
        }
    }

    pub fn properties() -> Self {
        Self {
            get_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(250),
            ..Self::none()
        }
    }

    pub fn saved_properties() -> Self {
        Self {
            get_all: Duration::from_millis(200),
            get_by_id: Duration::from_millis(150),
            create: Duration::from_millis(300),
            update: Duration::from_millis(250),
            delete: Duration::from_millis(200),
            delete_by_property_id: Duration::from_millis(200),
            is_saved: Duration::from_millis(100),
        }
    }

    pub fn agents() -> Self {
        Self::uniform(500)
    }

    pub(crate) async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

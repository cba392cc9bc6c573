/// Builder for [`EndpointConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndpointConfigBuilder {
    base_url: String,
}

impl EndpointConfigBuilder {
    /// Creates a builder with the given base URL.
    ///
    /// A trailing slash is stripped so that the fixed chat path can be
    /// appended verbatim.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> EndpointConfig {
        EndpointConfig {
            base_url: self.base_url,
        }
    }
}

/// Configuration for the HTTP answer service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndpointConfig {
    pub(crate) base_url: String,
}

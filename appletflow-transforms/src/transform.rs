use appletflow_core::domain::applet::AppletId;
use appletflow_core::domain::execution::ResultFragment;
use async_trait::async_trait;
use thiserror::Error;

/// Behaviour attached to an applet id.
///
/// The executor runs every registered transform whose applet id appears in the
/// pipeline, once, against the pipeline's input payload. Transforms never fail
/// the run: collaborator errors must be turned into a fallback value or an
/// error string inside the returned fragment.
///
/// # Example
///
/// ```rust
/// use appletflow_core::domain::applet::AppletId;
/// use appletflow_core::domain::execution::ResultFragment;
/// use appletflow_transforms::Transform;
/// use async_trait::async_trait;
///
/// struct Shout;
///
/// #[async_trait]
/// impl Transform for Shout {
///     fn applet_id(&self) -> AppletId {
///         42
///     }
///
///     fn name(&self) -> &'static str {
///         "shout"
///     }
///
///     async fn apply(&self, input: &str) -> ResultFragment {
///         ResultFragment::Summary(input.to_uppercase())
///     }
/// }
/// ```
#[async_trait]
pub trait Transform: Send + Sync {
    /// Applet id this transform is bound to. Must be unique within a registry.
    fn applet_id(&self) -> AppletId;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Runs the transformation on the pipeline input
    async fn apply(&self, input: &str) -> ResultFragment;
}

/// Errors raised while assembling a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("A transform is already registered for applet {0}")]
    DuplicateApplet(AppletId),
}

/// Registry mapping applet ids to their transforms
///
/// Adding a new applet behaviour means registering another transform; the
/// executor itself does not change.
#[derive(Default)]
pub struct TransformRegistry {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Registers a transform
    ///
    /// # Errors
    /// Returns `DuplicateApplet` if the applet id is already taken
    pub fn register<T: Transform + 'static>(&mut self, transform: T) -> Result<(), TransformError> {
        let id = transform.applet_id();
        if self.get(id).is_some() {
            return Err(TransformError::DuplicateApplet(id));
        }
        self.transforms.push(Box::new(transform));
        Ok(())
    }

    /// Gets the transform bound to an applet id
    pub fn get(&self, id: AppletId) -> Option<&dyn Transform> {
        self.transforms
            .iter()
            .find(|t| t.applet_id() == id)
            .map(|t| t.as_ref())
    }

    /// Transforms whose applet id occurs anywhere in `applet_ids`
    ///
    /// Membership only: position and repetition in the pipeline do not matter,
    /// and each transform is returned at most once, in registration order.
    pub fn applicable(&self, applet_ids: &[AppletId]) -> Vec<&dyn Transform> {
        self.transforms
            .iter()
            .filter(|t| applet_ids.contains(&t.applet_id()))
            .map(|t| t.as_ref())
            .collect()
    }

    /// Applet ids that have a behaviour attached
    pub fn applet_ids(&self) -> Vec<AppletId> {
        self.transforms.iter().map(|t| t.applet_id()).collect()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(AppletId);

    #[async_trait]
    impl Transform for Echo {
        fn applet_id(&self) -> AppletId {
            self.0
        }

        fn name(&self) -> &'static str {
            "echo"
        }

        async fn apply(&self, input: &str) -> ResultFragment {
            ResultFragment::Summary(input.to_string())
        }
    }

    #[test]
    fn test_transform_registration() {
        let mut registry = TransformRegistry::new();
        registry.register(Echo(1)).unwrap();

        assert!(registry.get(1).is_some());
        assert!(registry.get(2).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = TransformRegistry::new();
        registry.register(Echo(1)).unwrap();
        assert_eq!(
            registry.register(Echo(1)),
            Err(TransformError::DuplicateApplet(1))
        );
    }

    #[test]
    fn test_applicable_uses_membership() {
        let mut registry = TransformRegistry::new();
        registry.register(Echo(1)).unwrap();
        registry.register(Echo(5)).unwrap();
        registry.register(Echo(6)).unwrap();

        let ids: Vec<_> = registry
            .applicable(&[6, 3, 1, 1, 9])
            .iter()
            .map(|t| t.applet_id())
            .collect();
        assert_eq!(ids, vec![1, 6]);
        assert!(registry.applicable(&[2, 3]).is_empty());
    }

    #[tokio::test]
    async fn test_apply_through_registry() {
        let mut registry = TransformRegistry::new();
        registry.register(Echo(4)).unwrap();

        let fragment = registry.get(4).unwrap().apply("hello").await;
        assert_eq!(fragment, ResultFragment::Summary("hello".to_string()));
    }
}

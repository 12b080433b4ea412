//! Base trait for feature state in the store architecture.

use std::fmt::Debug;

/// Marker trait for feature state.
///
/// States should be:
/// - Plain values (Clone to take snapshots for observers)
/// - Self-contained (all data a screen needs)
/// - Comparable (PartialEq for detecting changes)
pub trait FeatureState: Clone + PartialEq + Debug + Send + 'static {}

impl<S: FeatureState> FeatureState for Option<S> {}

impl<S: FeatureState> FeatureState for Vec<S> {}

pub(crate) const GREEN_CHECK: &str = "✅";
pub(crate) const RED_X: &str = "❌";

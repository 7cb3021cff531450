//! The build environment seam.

/// A sink for build flags, standing in for the build tool's environment
/// object.
///
/// Implementations must append, never replace; flags already present stay in
/// place and keep their order.
pub trait BuildEnv {
    /// Append the given flags to the environment's flag collection.
    fn append_flags(&mut self, flags: &[String]);
}

impl BuildEnv for Vec<String> {
    fn append_flags(&mut self, flags: &[String]) {
        self.extend_from_slice(flags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_appends_in_order() {
        let mut env = vec!["-D EXISTING=1".to_string()];
        env.append_flags(&["-D A=2".to_string(), "-D B=3".to_string()]);

        assert_eq!(env, ["-D EXISTING=1", "-D A=2", "-D B=3"]);
    }
}

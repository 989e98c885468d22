//! Reduced-motion handling, entrance animations and the `--vh` workaround.

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const REDUCE_MOTION_CLASS: &str = "reduce-motion";
pub const ANIMATE_IN_CLASS: &str = "animate-in";
pub const ENTRANCE_SELECTOR: &str = ".card, .hero-title, .hero-subtitle";
pub const ENTRANCE_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const ENTRANCE_THRESHOLD: f64 = 0.1;
pub const VIEWPORT_UNIT_PROPERTY: &str = "--vh";

/// One percent of the inner height, as a CSS length.
pub fn viewport_unit(inner_height: f64) -> String {
    format!("{}px", inner_height * 0.01)
}

/// Entrance observation only runs while reduced motion is off.
pub fn observes_entrances(reduced_motion: bool) -> bool {
    !reduced_motion
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_unit_is_one_percent() {
        assert_eq!(viewport_unit(1000.0), "10px");
        assert_eq!(viewport_unit(750.0), "7.5px");
        assert_eq!(viewport_unit(0.0), "0px");
    }

    #[test]
    fn reduced_motion_disables_entrances() {
        assert!(observes_entrances(false));
        assert!(!observes_entrances(true));
    }
}

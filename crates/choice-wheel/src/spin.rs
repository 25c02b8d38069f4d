//! Spin arithmetic.
//!
//! A spin rotates the wheel clockwise by `offset` degrees plus a number of
//! whole turns. Because rotation is modulo 360, once the transition finishes
//! the wheel can be snapped to `offset` without any visible jump.

/// Extra time given to the transition before the wheel is considered settled.
pub const SETTLE_MARGIN_MILLIS: f64 = 100.0;

/// The angular width of each of `count` equal segments.
pub fn segment_width(count: usize) -> f64 {
    360.0 / count as f64
}

/// The `[start, end)` angles of segment `index` in the wheel's own frame.
pub fn wedge_bounds(index: usize, count: usize) -> (f64, f64) {
    let width = segment_width(count);
    (index as f64 * width, (index + 1) as f64 * width)
}

/// A CSS/SVG rotation of `degrees`.
pub fn rotate_transform(degrees: f64) -> String {
    format!("rotate({degrees}deg)")
}

/// The segment under the pointer after the wheel has turned `rotation`
/// degrees clockwise.
///
/// A wheel-frame angle `a` is shown at screen angle `a + rotation`, so the
/// pointer at `pointer_angle` sees `a = pointer_angle - rotation`. Angles on a
/// boundary belong to the segment that starts there.
pub fn landed_segment(count: usize, rotation: f64, pointer_angle: f64) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let under_pointer = (pointer_angle - rotation).rem_euclid(360.0);
    let index = (under_pointer / segment_width(count)).floor() as usize;
    Some(index.min(count - 1))
}

/// The timing and rotations of one spin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinPlan {
    /// Final resting angle in `[0, 360)`.
    pub offset: f64,
    /// Rotation applied during the transition.
    pub total_rotation: f64,
    /// Transition length in seconds.
    pub duration: f64,
}

impl SpinPlan {
    pub fn new(offset: f64, duration: f64, revolutions_per_second: f64) -> Self {
        let offset = offset.rem_euclid(360.0);
        SpinPlan {
            offset,
            total_rotation: 360.0 * revolutions_per_second * duration + offset,
            duration,
        }
    }

    /// The CSS `transition` used while spinning.
    pub fn transition(&self) -> String {
        format!("transform {}s ease", self.duration)
    }

    pub fn spinning_transform(&self) -> String {
        rotate_transform(self.total_rotation)
    }

    pub fn settled_transform(&self) -> String {
        rotate_transform(self.offset)
    }

    pub fn settle_delay_millis(&self) -> f64 {
        self.duration * 1000.0 + SETTLE_MARGIN_MILLIS
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn widths_cover_the_circle() {
        for count in 1..=37 {
            let width = segment_width(count);
            let total: f64 = (0..count)
                .map(|i| {
                    let (start, end) = wedge_bounds(i, count);
                    assert!((end - start - width).abs() < 1e-9);
                    end - start
                })
                .sum();
            assert!((total - 360.0).abs() < 1e-9, "{count}: {total}");
        }
    }

    #[test]
    fn four_segments_pointer_at_45() {
        assert_eq!(Some(0), landed_segment(4, 0.0, 45.0));
        // Turning a quarter brings the last wedge under the pointer.
        assert_eq!(Some(3), landed_segment(4, 90.0, 45.0));
        assert_eq!(Some(2), landed_segment(4, 180.0, 45.0));
        assert_eq!(Some(1), landed_segment(4, 270.0, 45.0));
        assert_eq!(None, landed_segment(0, 10.0, 45.0));
    }

    #[test]
    fn boundaries_belong_to_the_starting_wedge() {
        assert_eq!(Some(1), landed_segment(4, 0.0, 90.0));
        assert_eq!(Some(0), landed_segment(4, 0.0, 0.0));
        assert_eq!(Some(0), landed_segment(4, 360.0, 0.0));
    }

    #[test]
    fn landed_segment_matches_wedge_geometry() {
        for count in 2..=9 {
            for step in 0..72 {
                let rotation = step as f64 * 5.3;
                let pointer = 45.0;
                let index = landed_segment(count, rotation, pointer).unwrap();
                let (start, end) = wedge_bounds(index, count);
                let screen_start = start + rotation;
                let screen_end = end + rotation;
                let pointer_unwrapped = if pointer < screen_start {
                    pointer + 360.0 * ((screen_start - pointer) / 360.0).ceil()
                } else {
                    pointer
                };
                assert!(
                    pointer_unwrapped >= screen_start - 1e-9
                        && pointer_unwrapped < screen_end + 1e-9,
                    "count {count} rotation {rotation}: {index} spans {screen_start}..{screen_end}"
                );
            }
        }
    }

    #[test]
    fn settled_rotation_ignores_revolutions() {
        let slow = SpinPlan::new(123.0, 5.0, 1.0);
        let fast = SpinPlan::new(123.0, 5.0, 7.0);
        assert_eq!(slow.settled_transform(), fast.settled_transform());
        assert_eq!("rotate(123deg)", fast.settled_transform());
        assert_eq!(360.0 * 7.0 * 5.0 + 123.0, fast.total_rotation);
        assert_eq!(5100.0, fast.settle_delay_millis());
        assert_eq!("transform 5s ease", fast.transition());
        assert_eq!(10.0, SpinPlan::new(370.0, 1.0, 3.0).offset);
    }
}

//! Brightness ramp for the breathing effect.
//!
//! A triangle wave over `0..=255`: up one step per tick, bouncing off each
//! bound. The bounce is decided before the step, so each bound is shown for
//! exactly one tick and a full period is 510 ticks.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Rising,
    Falling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pulse {
    brightness: u8,
    direction: Direction,
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new()
    }
}

impl Pulse {
    /// Ticks in one full dark → bright → dark cycle.
    pub const PERIOD: usize = 2 * u8::MAX as usize;

    /// Dark, about to brighten.
    pub const fn new() -> Self {
        Self {
            brightness: 0,
            direction: Direction::Rising,
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one step along the ramp.
    pub fn advance(&mut self) {
        match self.brightness {
            0 => self.direction = Direction::Rising,
            u8::MAX => self.direction = Direction::Falling,
            _ => {}
        }

        self.brightness = match self.direction {
            Direction::Rising => self.brightness + 1,
            Direction::Falling => self.brightness - 1,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn advanced(ticks: usize) -> Pulse {
        let mut pulse = Pulse::new();
        for _ in 0..ticks {
            pulse.advance();
        }
        pulse
    }

    #[test]
    fn starts_dark_and_rising() {
        let pulse = Pulse::new();
        assert_eq!(pulse.brightness(), 0);
        assert_eq!(pulse.direction(), Direction::Rising);
    }

    #[rstest]
    #[case(1, 1, Direction::Rising)]
    #[case(254, 254, Direction::Rising)]
    #[case(255, 255, Direction::Rising)]
    #[case(256, 254, Direction::Falling)]
    #[case(509, 1, Direction::Falling)]
    #[case(510, 0, Direction::Falling)]
    #[case(511, 1, Direction::Rising)]
    fn test_ramp_positions(
        #[case] ticks: usize,
        #[case] brightness: u8,
        #[case] direction: Direction,
    ) {
        let pulse = advanced(ticks);
        assert_eq!(pulse.brightness(), brightness);
        assert_eq!(pulse.direction(), direction);
    }

    #[test]
    fn period_is_closed_triangle() {
        let mut pulse = Pulse::new();
        let mut seen = Vec::with_capacity(Pulse::PERIOD);
        for _ in 0..Pulse::PERIOD {
            seen.push(pulse.brightness());
            pulse.advance();
        }

        let expected: Vec<u8> = (0..=255).chain((1..=254).rev()).collect();
        assert_eq!(seen, expected);
        assert_eq!(pulse.brightness(), 0);
    }

    #[test]
    fn each_bound_shown_once_per_period() {
        let mut pulse = advanced(Pulse::PERIOD);
        let mut zeros = 0;
        let mut peaks = 0;
        for _ in 0..Pulse::PERIOD {
            match pulse.brightness() {
                0 => zeros += 1,
                255 => peaks += 1,
                _ => {}
            }
            pulse.advance();
        }
        assert_eq!((zeros, peaks), (1, 1));
    }
}

use embedded_hal::blocking::delay::DelayMs;

/// Base frequency the buzzer PWM slice is configured for.
pub const BUZZER_FREQ_HZ: u32 = 100;

pub const TONE_MS: u32 = 1000;
pub const TONE_PAUSE_MS: u32 = 100;
pub const BLINK_ON_MS: u32 = 200;
pub const BLINK_OFF_MS: u32 = 125;
pub const CYCLE_PAUSE_MS: u32 = 500;
pub const REPEATS: u32 = 3;

/// Buzzer plus indicator LED, as one sink.
pub trait AlertEmitter {
    fn tone_on(&mut self);
    fn tone_off(&mut self);
    fn indicator(&mut self, on: bool);
}

/// Game-over signal: three beep-and-blink cycles, blocking throughout.
/// Runs once per game and always returns.
pub fn run<E, D>(emitter: &mut E, delay: &mut D)
where
    E: AlertEmitter,
    D: DelayMs<u32>,
{
    for _ in 0..REPEATS {
        emitter.tone_on();
        delay.delay_ms(TONE_MS);
        emitter.tone_off();
        delay.delay_ms(TONE_PAUSE_MS);

        emitter.indicator(true);
        delay.delay_ms(BLINK_ON_MS);
        emitter.indicator(false);
        delay.delay_ms(BLINK_OFF_MS);

        delay.delay_ms(CYCLE_PAUSE_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Event {
        ToneOn,
        ToneOff,
        IndicatorOn,
        IndicatorOff,
    }

    #[derive(Default)]
    struct MockEmitter {
        events: Vec<Event>,
    }

    impl AlertEmitter for MockEmitter {
        fn tone_on(&mut self) {
            self.events.push(Event::ToneOn);
        }

        fn tone_off(&mut self) {
            self.events.push(Event::ToneOff);
        }

        fn indicator(&mut self, on: bool) {
            self.events.push(if on {
                Event::IndicatorOn
            } else {
                Event::IndicatorOff
            });
        }
    }

    #[derive(Default)]
    struct MockDelay {
        sleeps: Vec<u32>,
    }

    impl DelayMs<u32> for MockDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.sleeps.push(ms);
        }
    }

    #[test]
    fn exactly_three_beep_blink_cycles() {
        let mut emitter = MockEmitter::default();
        let mut delay = MockDelay::default();
        run(&mut emitter, &mut delay);

        let cycle = [
            Event::ToneOn,
            Event::ToneOff,
            Event::IndicatorOn,
            Event::IndicatorOff,
        ];
        let expected: Vec<Event> = cycle.iter().copied().cycle().take(cycle.len() * 3).collect();
        assert_eq!(emitter.events, expected);
    }

    #[test]
    fn pauses_follow_the_fixed_pattern() {
        let mut emitter = MockEmitter::default();
        let mut delay = MockDelay::default();
        run(&mut emitter, &mut delay);

        let per_cycle = [
            TONE_MS,
            TONE_PAUSE_MS,
            BLINK_ON_MS,
            BLINK_OFF_MS,
            CYCLE_PAUSE_MS,
        ];
        let expected: Vec<u32> = per_cycle
            .iter()
            .copied()
            .cycle()
            .take(per_cycle.len() * 3)
            .collect();
        assert_eq!(delay.sleeps, expected);
    }
}

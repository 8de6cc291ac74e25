//! Bus speed switching around bulk transfers
//!
//! Addressed buses (I2C) are often shared with slower peripherals, so the
//! clock is only raised to the burst rate for the duration of a flush and
//! put back to the idle rate afterwards. Point-to-point transports ignore
//! [`DisplayInterface::set_speed`], which makes this a no-op for SPI.

use crate::interface::DisplayInterface;

/// Default burst clock rate in Hz
pub const DEFAULT_BURST_HZ: u32 = 400_000;

/// Default idle clock rate in Hz
pub const DEFAULT_IDLE_HZ: u32 = 100_000;

/// Clock rates used during and outside a flush
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BusSpeeds {
    /// Rate used while a flush is on the bus
    pub burst_hz: u32,
    /// Rate restored once the flush is over
    pub idle_hz: u32,
}

impl BusSpeeds {
    /// Create a new pair of rates
    pub const fn new(burst_hz: u32, idle_hz: u32) -> Self {
        Self { burst_hz, idle_hz }
    }
}

impl Default for BusSpeeds {
    fn default() -> Self {
        Self::new(DEFAULT_BURST_HZ, DEFAULT_IDLE_HZ)
    }
}

/// Run `f` with the bus at burst speed
///
/// The idle rate is restored after `f` returns, whether it succeeded or not,
/// and `f`'s result is passed through.
pub fn with_burst_speed<I, T, F>(interface: &mut I, speeds: BusSpeeds, f: F) -> T
where
    I: DisplayInterface,
    F: FnOnce(&mut I) -> T,
{
    interface.set_speed(speeds.burst_hz);
    let result = f(interface);
    interface.set_speed(speeds.idle_hz);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use embedded_hal::delay::DelayNs;

    #[derive(Debug, PartialEq)]
    enum Event {
        Speed(u32),
        Command(u8),
    }

    #[derive(Default)]
    struct RecordingInterface {
        events: Vec<Event>,
    }

    impl DisplayInterface for RecordingInterface {
        type Error = ();

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.events.push(Event::Command(command));
            if command == 0xFF { Err(()) } else { Ok(()) }
        }

        fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_speed(&mut self, hz: u32) {
            self.events.push(Event::Speed(hz));
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
    }

    #[test]
    fn test_default_speeds() {
        assert_eq!(BusSpeeds::default(), BusSpeeds::new(400_000, 100_000));
    }

    #[test]
    fn test_brackets_work_with_burst_then_idle() {
        let mut interface = RecordingInterface::default();
        let speeds = BusSpeeds::new(1_000_000, 100_000);
        let result = with_burst_speed(&mut interface, speeds, |i| i.send_command(0x5C));
        assert!(result.is_ok());
        assert_eq!(
            interface.events,
            [
                Event::Speed(1_000_000),
                Event::Command(0x5C),
                Event::Speed(100_000)
            ]
        );
    }

    #[test]
    fn test_restores_idle_on_failure() {
        let mut interface = RecordingInterface::default();
        let result = with_burst_speed(&mut interface, BusSpeeds::default(), |i| {
            i.send_command(0xFF)?;
            i.send_command(0x5C)
        });
        assert!(result.is_err());
        assert_eq!(
            interface.events,
            [
                Event::Speed(400_000),
                Event::Command(0xFF),
                Event::Speed(100_000)
            ]
        );
    }
}

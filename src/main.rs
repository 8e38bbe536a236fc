#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_halt as _;

use cortex_m_rt::entry;
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::PwmPin;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

use rp_pico::hal::{
    clocks::{init_clocks_and_plls, Clock},
    fugit::RateExtU32,
    gpio::{FunctionI2C, Pin, PullUp},
    pac,
    sio::Sio,
    watchdog::Watchdog,
    Timer, I2C,
};

use chess_clock::alert::{self, AlertEmitter};
use chess_clock::clock::{ClockState, Phase, Player, INITIAL_BUDGET_MS};
use chess_clock::display::{render, render_final, RenderSurface};

/// Loop pacing: display refresh and button sampling at ~20Hz.
const POLL_INTERVAL_MS: u32 = 50;
const PARK_SLEEP_MS: u32 = 100;

/// Buffered SSD1306 behind the render seam: text draws land in RAM,
/// `commit` pushes the whole frame over I2C.
struct Oled<DI, SIZE>
where
    SIZE: DisplaySize,
{
    driver: Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>,
}

impl<DI, SIZE> RenderSurface for Oled<DI, SIZE>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn clear(&mut self) {
        self.driver.clear_buffer();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.driver)
            .unwrap();
    }

    fn commit(&mut self) {
        self.driver.flush().unwrap();
    }
}

/// PWM buzzer plus status LED behind the alert seam.
struct BuzzerLed<B, L> {
    buzzer: B,
    led: L,
}

impl<B, L> AlertEmitter for BuzzerLed<B, L>
where
    B: PwmPin<Duty = u16>,
    L: OutputPin,
{
    fn tone_on(&mut self) {
        // 50% duty at the slice's 100Hz base frequency.
        let duty = self.buzzer.get_max_duty() / 2;
        self.buzzer.set_duty(duty);
    }

    fn tone_off(&mut self) {
        self.buzzer.set_duty(0);
    }

    fn indicator(&mut self, on: bool) {
        if on {
            self.led.set_high().ok();
        } else {
            self.led.set_low().ok();
        }
    }
}

#[entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let sio = Sio::new(pac.SIO);

    let external_xtal_freq_hz = 12_000_000u32;
    let clocks = init_clocks_and_plls(
        external_xtal_freq_hz,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let mut delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());
    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let led = pins.gpio13.into_push_pull_output();
    let button_white = pins.gpio5.into_pull_up_input();
    let button_black = pins.gpio6.into_pull_up_input();

    // SSD1306 128x64 on I2C1 (SDA=GP14, SCL=GP15).
    let sda: Pin<_, FunctionI2C, PullUp> = pins.gpio14.reconfigure();
    let scl: Pin<_, FunctionI2C, PullUp> = pins.gpio15.reconfigure();
    let i2c = I2C::i2c1(
        pac.I2C1,
        sda,
        scl,
        400.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );

    let interface = I2CDisplayInterface::new(i2c);
    let mut surface = Oled {
        driver: Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode(),
    };
    surface.driver.init().unwrap();

    // Buzzer on GP21 (slice 2, channel B). With the default wrap of
    // 65535, a divider of 19 + 1/16 puts the carrier at ~100Hz.
    let pwm_slices = rp_pico::hal::pwm::Slices::new(pac.PWM, &mut pac.RESETS);
    let mut buzzer_slice = pwm_slices.pwm2;
    buzzer_slice.set_div_int(19);
    buzzer_slice.set_div_frac(1);
    buzzer_slice.enable();
    let mut buzzer = buzzer_slice.channel_b;
    buzzer.output_to(pins.gpio21);

    let mut alarm = BuzzerLed { buzzer, led };
    alarm.tone_off();
    alarm.indicator(false);

    defmt::info!("chess clock up, {}ms per side", INITIAL_BUDGET_MS);

    let mut state = ClockState::new(INITIAL_BUDGET_MS);
    let mut last = timer.get_counter();

    while state.phase() == Phase::Running {
        let now = timer.get_counter();
        // Monotonic counter, but clamp anyway: no negative decrements.
        let elapsed_ms = now
            .checked_duration_since(last)
            .map(|d| d.to_millis() as u32)
            .unwrap_or(0);
        last = now;

        // Only the side on move can end its own turn.
        let active_pressed = match state.active() {
            Player::White => button_white.is_low().unwrap_or(false),
            Player::Black => button_black.is_low().unwrap_or(false),
        };

        let on_move = state.active();
        state.tick(elapsed_ms, active_pressed);
        if state.active() != on_move {
            defmt::info!("turn passed to {}", state.active());
        }

        render(&mut surface, &state);
        delay.delay_ms(POLL_INTERVAL_MS);
    }

    let winner = state.winner().unwrap_or(Player::White);
    defmt::info!(
        "flag fell, {} wins with {}ms left",
        winner,
        state.remaining_ms(winner)
    );

    render_final(&mut surface, winner, state.remaining_ms(winner));
    alert::run(&mut alarm, &mut delay);

    // Nothing left to do until power-off.
    loop {
        delay.delay_ms(PARK_SLEEP_MS);
    }
}

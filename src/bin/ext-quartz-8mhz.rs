#![no_main]
#![no_std]

use panic_abort as _;
use rtic::app;

use stm32f1xx_hal::flash::FlashExt;
use stm32f1xx_hal::gpio::{GpioExt, Output, PushPull, PA0, PA1, PB6, PB7, PC13};
use stm32f1xx_hal::pac::TIM3;
use stm32f1xx_hal::timer::CounterUs;

use systick_monotonic::Systick;

use stm32f1_soft_pwm::hw::{itm, BsrrGpio, DwtTicks};
use stm32f1_soft_pwm::*;

//-----------------------------------------------------------------------------

const BREATH_STEP_MS: u64 = 20;

pub struct Outputs {
    _led: PC13<Output<PushPull>>,
    _ch1: PA0<Output<PushPull>>,
    _ch2: PA1<Output<PushPull>>,
    _ch3: PB6<Output<PushPull>>,
    _ch4: PB7<Output<PushPull>>,
}

/// Triangle sweep of one channel's duty cycle
pub struct Breath {
    handle: PinHandle,
    duty: u8,
    rising: bool,
}

impl Breath {
    fn step(&mut self) -> u8 {
        if self.rising {
            self.duty += 1;
            self.rising = self.duty < pwm::MAX_DUTY;
        } else {
            self.duty -= 1;
            self.rising = self.duty == 0;
        }
        self.duty
    }
}

//-----------------------------------------------------------------------------

#[app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [RTCALARM])]
mod app {
    use super::*;

    #[shared]
    struct Shared {
        pwm: BoardPwm<LogFaultSink>,
    }

    #[local]
    struct Local {
        ticks: DwtTicks,
        gpio: BsrrGpio,
        breath: Breath,
        poll_timer: PollTimer<CounterUs<TIM3>>,
        outputs: Outputs,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<{ config::SYSTICK_RATE_HZ }>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        use stm32f1xx_hal::prelude::_fugit_RateExtU32;
        use stm32f1xx_hal::prelude::_stm32_hal_rcc_RccExt;
        use stm32f1xx_hal::prelude::_stm32f4xx_hal_timer_TimerExt;

        itm::itm_reset(config::LOG_LEVEL).unwrap();

        let mut flash = ctx.device.FLASH.constrain();

        let mut gpioa = ctx.device.GPIOA.split();
        let mut gpiob = ctx.device.GPIOB.split();
        let mut gpioc = ctx.device.GPIOC.split();

        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc
            .cfgr
            .use_hse(config::MCU_XTAL_HZ.Hz())
            .sysclk(config::SYSCLK_HZ.Hz())
            .pclk1(36.MHz())
            .freeze(&mut flash.acr);

        itm::itm_update_clocks(clocks.sysclk().to_Hz()).unwrap();

        let mono = Systick::new(ctx.core.SYST, clocks.sysclk().to_Hz());

        let mut dcb = ctx.core.DCB;
        let mut dwt = ctx.core.DWT;
        let ticks = DwtTicks::enable(&mut dcb, &mut dwt, clocks.sysclk().to_Hz());

        //---------------------------------------------------------------------

        let outputs = Outputs {
            _led: gpioc.pc13.into_push_pull_output(&mut gpioc.crh),
            _ch1: gpioa.pa0.into_push_pull_output(&mut gpioa.crl),
            _ch2: gpioa.pa1.into_push_pull_output(&mut gpioa.crl),
            _ch3: gpiob.pb6.into_push_pull_output(&mut gpiob.crl),
            _ch4: gpiob.pb7.into_push_pull_output(&mut gpiob.crl),
        };

        let settings = Settings::for_ticks(&ticks);
        let mut pwm = BoardPwm::new(settings, LogFaultSink);

        // the table below fits the registry, a rejection here is a wiring mistake
        let led = pwm.create_pin(Port::C, 13, 200.Hz(), 0);
        let led = pwm.register(led).unwrap();

        for (port, pin, freq, duty) in [
            (Port::A, 0, 50u32, 10),
            (Port::A, 1, 50, 50),
            (Port::B, 6, 400, 25),
            (Port::B, 7, 1_000, 75),
        ] {
            let channel = pwm.create_pin(port, pin, freq.Hz(), duty);
            pwm.register(channel).unwrap();
        }

        log::info!(
            "sw pwm: {} channels, {} ticks per poll",
            pwm.len(),
            pwm.settings().poll_ticks()
        );

        //---------------------------------------------------------------------

        let mut timer = ctx.device.TIM3.counter_us(&clocks);
        timer.listen(stm32f1xx_hal::timer::Event::Update);

        ctx.device
            .DBGMCU
            .cr
            .modify(|_, w| w.dbg_tim3_stop().set_bit());

        let mut poll_timer = PollTimer::new(timer, settings.poll_interval);
        poll_timer.start().unwrap();

        breathe::spawn().unwrap();

        (
            Shared { pwm },
            Local {
                ticks,
                gpio: BsrrGpio::new(),
                breath: Breath {
                    handle: led,
                    duty: 0,
                    rising: true,
                },
                poll_timer,
                outputs,
            },
            init::Monotonics(mono),
        )
    }

    //-------------------------------------------------------------------------

    #[idle(local = [poll_timer, outputs])]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }

    //-------------------------------------------------------------------------

    #[task(binds = TIM3, shared = [pwm], local = [ticks, gpio], priority = 3)]
    fn pwm_tick(mut ctx: pwm_tick::Context) {
        unsafe { (*TIM3::ptr()).sr.modify(|_, w| w.uif().clear_bit()) };

        let ticks = ctx.local.ticks;
        let gpio = ctx.local.gpio;
        ctx.shared.pwm.lock(|pwm| pwm.update_all(&*ticks, gpio));
    }

    #[task(shared = [pwm], local = [breath])]
    fn breathe(mut ctx: breathe::Context) {
        use systick_monotonic::*;

        let breath = ctx.local.breath;
        let duty = breath.step();
        ctx.shared
            .pwm
            .lock(|pwm| pwm.change_duty(breath.handle, duty));

        breathe::spawn_after(BREATH_STEP_MS.millis()).unwrap();
    }
}

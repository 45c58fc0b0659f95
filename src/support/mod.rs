mod tick_source;
pub use tick_source::{TickSource, Ticks};

mod gpio_sink;
pub use gpio_sink::{DynPin, GpioSink, HalPins};

mod timer_interface;
pub use timer_interface::PollTimer;

pub mod button;
pub mod checkbox;
pub mod input;
pub mod range_slider;

pub use button::Button;
pub use checkbox::Checkbox;
pub use input::NumberInput;
pub use range_slider::RangeSlider;

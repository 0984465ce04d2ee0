pub(crate) mod capture;
mod device;
pub(crate) mod playback;
mod resampler;
pub(crate) mod wav;

pub(crate) use resampler::Resampler;

pub use {capture::AudioCapturer, device::DeviceMediaServices, playback::AudioPlayer};

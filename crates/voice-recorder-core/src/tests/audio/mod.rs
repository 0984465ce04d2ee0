mod device;
mod playback;
mod resampler;
mod wav;

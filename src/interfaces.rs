// Definitions that are used throughout all modules

// Fixed-wavevector operating mode of a triple-axis spectrometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedK {
    Ki,
    Kf,
}

// Utils compartidos

pub mod firebase_ffi;

fn main() {
    // ESP-IDF link arguments are only needed for the firmware binary; host
    // builds (tests, fuzzing) run without the esp toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}

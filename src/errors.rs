
error_chain! {
    errors {
        #[doc = "A table entry held a value that maps to no mode variant."]
        UnknownModeCode(mode: &'static str, code: f64) {
            description("unknown mode code")
            display("unknown {} code: {}", mode, code)
        }

        #[doc = "No sensor answered on the requested port."]
        PortUnavailable(port: ::navx::Port) {
            description("sensor port unavailable")
            display("no sensor answered on port {:?}", port)
        }

        InvalidLogLevel(level: ::std::string::String) {
            description("invalid log level")
            display("invalid log level: {}", level)
        }
    }
}

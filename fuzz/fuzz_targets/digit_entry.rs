#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use clockity_core::{NullDisplay, NullSignals};
use clockity_engine::{CountdownEngine, CountdownPhase};

#[derive(Arbitrary, Debug)]
enum Command {
    Digit(u8),
    Arm,
    Start,
    Pause,
    Clear,
    Advance(u8),
}

fuzz_target!(|commands: Vec<Command>| {
    let mut countdown = CountdownEngine::new(Arc::new(NullDisplay), Arc::new(NullSignals));

    for command in commands {
        let _ = match command {
            Command::Digit(d) => countdown.enter_digit(d),
            Command::Arm => countdown.arm(),
            Command::Start => countdown.start(),
            Command::Pause => countdown.pause(),
            Command::Clear => {
                countdown.clear();
                Ok(())
            }
            Command::Advance(n) => {
                for _ in 0..n {
                    countdown.advance();
                }
                Ok(())
            }
        };

        let remaining = countdown.remaining();
        assert!(remaining.minutes() < 60 && remaining.seconds() < 60);
        assert!(countdown.digit_buffer().len() <= 6);
        if countdown.phase() == CountdownPhase::Running {
            assert!(!remaining.is_zero());
        }
    }
});

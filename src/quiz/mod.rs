pub mod clock;
pub mod distractors;
pub mod ports;
pub mod question;
pub mod session;


pub use clock::{ Clock, SharedTimer };
pub use distractors::DistractorPool;
pub use ports::{ AudioPort, NullAudio, SchedulerPort };
pub use question::QuizQuestion;
pub use session::{ Mode, Outcome, QuizPhase, QuizSession, SessionState };

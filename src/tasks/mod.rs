pub(crate) mod session_sweeper;

mod continuity;
mod control;
mod deadlock;
mod instance;
mod support;

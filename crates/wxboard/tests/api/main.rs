mod helpers;
mod live_cycle;
mod scheduler;

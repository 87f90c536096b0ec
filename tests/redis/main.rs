mod commands;
mod concurrency;

mod concurrency;
mod non_sticky;
mod replay;
mod sticky;

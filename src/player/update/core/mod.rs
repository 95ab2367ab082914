mod reducer;
mod runtime;
mod shortcuts;

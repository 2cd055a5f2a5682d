mod classify;
mod validation;

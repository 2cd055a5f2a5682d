mod gemini;
mod helpers;
mod probe;

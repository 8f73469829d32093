mod path;
mod state;

//! wslevels - level-based workspace navigation for i3 and sway.
//!
//! Meant to be bound to keys, e.g. in the i3 config:
//!
//! ```text
//! bindsym $mod+l exec --no-startup-id wslevels right
//! bindsym $mod+Shift+l exec --no-startup-id wslevels right container
//! bindsym $mod+j exec --no-startup-id wslevels down
//! ```

fn main() {
    if let Err(err) = wslevels_lib::cli::run() {
        eprintln!("wslevels: {err}");
        std::process::exit(1);
    }
}

//! Stylesheets injected by the features that need keyframes or layout the
//! page CSS does not ship.

pub const SPARKLE_CSS: &str = r#"
.sparkle {
  position: absolute;
  width: 8px;
  height: 8px;
  pointer-events: none;
  z-index: 5;
  animation: sparkle-pop 0.8s ease-out forwards;
}
.sparkle::before,
.sparkle::after {
  content: "";
  position: absolute;
  background: #FFCB05;
}
.sparkle::before {
  width: 100%;
  height: 2px;
  top: 50%;
  left: 0;
  transform: translateY(-50%);
  border-radius: 1px;
}
.sparkle::after {
  width: 2px;
  height: 100%;
  left: 50%;
  top: 0;
  transform: translateX(-50%);
  border-radius: 1px;
}
.sparkle--large {
  width: 12px;
  height: 12px;
}
.sparkle--white::before,
.sparkle--white::after {
  background: #fff;
}
@keyframes sparkle-pop {
  0% { opacity: 0; transform: scale(0) rotate(0deg); }
  30% { opacity: 1; transform: scale(1.2) rotate(20deg); }
  100% { opacity: 0; transform: scale(0.5) rotate(45deg); }
}
"#;

pub const TYPEWRITER_CSS: &str = r#"
.section-tag--typewriter .section-tag__char {
  opacity: 0;
  display: inline-block;
  transition: opacity 0.15s ease;
}
.section-tag--typewriter .section-tag__char.is-revealed {
  opacity: 1;
}
.section-tag--typewriter .section-tag__cursor {
  display: inline-block;
  width: 2px;
  height: 1em;
  background: currentColor;
  margin-left: 2px;
  vertical-align: text-bottom;
  animation: typewriter-blink 0.6s step-end infinite;
}
.section-tag--typewriter .section-tag__cursor.is-done {
  animation: typewriter-blink-out 0.6s step-end forwards;
}
@keyframes typewriter-blink {
  0%, 100% { opacity: 1; }
  50% { opacity: 0; }
}
@keyframes typewriter-blink-out {
  0% { opacity: 1; }
  100% { opacity: 0; }
}
"#;

pub const SPIN_CSS: &str = r#"
.deco-pokeball--spinning {
  animation: pokeball-spin 8s linear infinite;
}
@keyframes pokeball-spin {
  from { transform: rotate(0deg); }
  to { transform: rotate(360deg); }
}
"#;

pub const SCROLL_INDICATOR_CSS: &str = r#"
.scroll-indicator {
  transition: opacity 0.4s ease, visibility 0.4s ease;
}
.scroll-indicator.is-hidden {
  opacity: 0;
  visibility: hidden;
  pointer-events: none;
}
"#;

pub fn slider_css(breakpoint_px: u64) -> String {
    format!(
        r#"
@media (max-width: {breakpoint_px}px) {{
  .review-cards {{
    display: flex;
    gap: 15px;
    overflow-x: auto;
    overflow-y: hidden;
    scroll-snap-type: x mandatory;
    -webkit-overflow-scrolling: touch;
    scrollbar-width: none;
    padding-bottom: 10px;
    cursor: grab;
  }}
  .review-cards::-webkit-scrollbar {{
    display: none;
  }}
  .review-cards.is-grabbing {{
    cursor: grabbing;
    scroll-snap-type: none;
  }}
  .review-cards > * {{
    flex-shrink: 0;
    width: 85%;
    scroll-snap-align: start;
  }}
}}
"#
    )
}

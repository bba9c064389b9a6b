//! Геометрия выпадающих меню: прямоугольные области на экране и проверка,
//! попала ли точка события хотя бы в одну из них. Никакой привязки к DOM —
//! браузерный слой лишь собирает прямоугольники и координаты клика.

const MENU_WIDTH: f64 = 110.0;
const MENU_GAP: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Точка вне всех зарегистрированных областей. Пустой набор областей считается
/// "всё снаружи": меню без измеренных прямоугольников закрывается любым кликом.
pub fn is_outside(regions: &[Region], x: f64, y: f64) -> bool {
    !regions.iter().any(|region| region.contains(x, y))
}

/// Положение меню от текущего прямоугольника триггера: под ним, правые края
/// выровнены.
pub fn dropdown_position(trigger: Region, scroll_y: f64) -> (f64, f64) {
    let top = trigger.bottom() + scroll_y + MENU_GAP;
    let left = trigger.right() - MENU_WIDTH;
    (top, left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_includes_edges() {
        let region = Region::new(10.0, 20.0, 100.0, 50.0);

        assert!(region.contains(10.0, 20.0));
        assert!(region.contains(110.0, 70.0));
        assert!(region.contains(60.0, 45.0));
        assert!(!region.contains(9.9, 45.0));
        assert!(!region.contains(60.0, 70.1));
    }

    #[test]
    fn is_outside_requires_miss_on_every_region() {
        let regions = [
            Region::new(0.0, 0.0, 10.0, 10.0),
            Region::new(100.0, 100.0, 10.0, 10.0),
        ];

        assert!(!is_outside(&regions, 5.0, 5.0));
        assert!(!is_outside(&regions, 105.0, 105.0));
        assert!(is_outside(&regions, 50.0, 50.0));
    }

    #[test]
    fn is_outside_with_no_regions_is_always_true() {
        assert!(is_outside(&[], 0.0, 0.0));
    }

    #[test]
    fn dropdown_position_sits_below_and_right_aligned() {
        let trigger = Region::new(200.0, 40.0, 30.0, 20.0);

        let (top, left) = dropdown_position(trigger, 0.0);
        assert_eq!(top, 64.0);
        assert_eq!(left, 120.0);
    }

    #[test]
    fn dropdown_position_accounts_for_scroll_offset() {
        let trigger = Region::new(200.0, 40.0, 30.0, 20.0);

        let (top, _) = dropdown_position(trigger, 150.0);
        assert_eq!(top, 214.0);
    }
}

use cinemystery_core as game;
use game::{CellCount, RevealMask};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct PosterProps {
    /// Empty while the catalog has no poster; a placeholder is shown instead.
    pub poster_url: AttrValue,
    pub mask: RevealMask,
}

fn cell_class(mask: &RevealMask, index: CellCount) -> Classes {
    if mask.is_revealed(game::cell_coords(mask.size(), index)) {
        classes!("cell", "open")
    } else {
        classes!("cell", format!("tint-{}", game::cell_tint(index)))
    }
}

#[function_component]
pub(crate) fn PosterView(props: &PosterProps) -> Html {
    let PosterProps { poster_url, mask } = props;

    if poster_url.is_empty() {
        return html! {
            <div class="poster placeholder">
                <div class="spinner"/>
            </div>
        };
    }

    let (cols, rows) = mask.size();
    let style = format!(
        "grid-template-columns: repeat({cols}, 1fr); grid-template-rows: repeat({rows}, 1fr);"
    );

    html! {
        <div class="poster">
            <img src={poster_url.clone()} alt="Movie poster"/>
            if !mask.is_full() {
                <div class="mask" {style}>
                    { for (0..mask.total_cells()).map(|index| html! {
                        <span class={cell_class(mask, index)}/>
                    }) }
                </div>
            }
        </div>
    }
}

//! The executioner's lines, per mood and moment.
//!
//! Every moment of every mood carries some unconditional lines so selection
//! always has a candidate; the conditional lines add flavour once the player
//! has history (streaks, wins, a long word, a spent hint).

use crate::types::{Mood, Moment};

use super::selector::DialogueLine;

const fn line(text: &'static str) -> DialogueLine {
    DialogueLine::new(text)
}

/// Lines for one mood, one slice per moment.
#[derive(Debug, Clone, Copy)]
pub struct MoodLines {
    /// A fresh word is on the board.
    pub game_start: &'static [DialogueLine],
    /// Letter found.
    pub correct_guess: &'static [DialogueLine],
    /// Letter missed.
    pub wrong_guess: &'static [DialogueLine],
    /// One life left.
    pub almost_dead: &'static [DialogueLine],
    /// Player won.
    pub win: &'static [DialogueLine],
    /// Player lost.
    pub loss: &'static [DialogueLine],
    /// Achievement unlocked.
    pub achievement: &'static [DialogueLine],
    /// Streak milestone.
    pub streak: &'static [DialogueLine],
}

impl MoodLines {
    /// The candidates for `moment`.
    #[must_use]
    pub fn for_moment(&self, moment: Moment) -> &'static [DialogueLine] {
        match moment {
            Moment::GameStart => self.game_start,
            Moment::CorrectGuess => self.correct_guess,
            Moment::WrongGuess => self.wrong_guess,
            Moment::AlmostDead => self.almost_dead,
            Moment::Win => self.win,
            Moment::Loss => self.loss,
            Moment::Achievement => self.achievement,
            Moment::Streak => self.streak,
        }
    }
}

/// The candidates for a mood and moment.
#[must_use]
pub fn lines(mood: Mood, moment: Moment) -> &'static [DialogueLine] {
    let table = match mood {
        Mood::Neutral => &NEUTRAL,
        Mood::Impressed => &IMPRESSED,
        Mood::Sarcastic => &SARCASTIC,
        Mood::Frustrated => &FRUSTRATED,
        Mood::Ruthless => &RUTHLESS,
        Mood::ChildFriendly => &CHILD_FRIENDLY,
    };
    table.for_moment(moment)
}

// ---------------------------------------------------------------------------
// Neutral
// ---------------------------------------------------------------------------

const NEUTRAL: MoodLines = MoodLines {
    game_start: &[
        line("Welcome to the gallows, scout. Let's see what you're worth."),
        line("Ah, a new challenger. I hope you're better than the last one..."),
        line("The gallows are ready. Are you?"),
        line("Hmm, let's see if you're smarter than you look."),
        line("Another scout who thinks they're clever. Prove it."),
        line("The rope is fresh, the wood is sturdy. We can begin."),
        line("I have a word for you. A good word. A deadly word."),
        line("Welcome back, {player_name}. {total_wins} wins already... let's see if you can add one.")
            .when(|c| c.total_wins >= 5)
            .weighted(2),
        line("{player_name}, back for more? You've got nerve.")
            .when(|c| c.total_games >= 3)
            .weighted(2),
        line("A {category} word today. Interesting...")
            .when(|c| !c.category.is_empty())
            .weighted(2),
        line("Hmm, {word_length} letters. That'll be a challenge.")
            .when(|c| c.word_length >= 8)
            .weighted(2),
        line("A streak of {streak}? Not bad. But it ends today.")
            .when(|c| c.streak >= 3)
            .weighted(3),
    ],
    correct_guess: &[
        line("Hmm, not bad."),
        line("Fine, that one was in there."),
        line("A lucky shot, surely."),
        line("You're lucky today."),
        line("Good guess. But there are more letters..."),
        line("That was an easy one. The next will be harder."),
        line("Hmm, {player_name} knows what they're doing.")
            .when(|c| c.total_wins >= 10)
            .weighted(2),
        line("With a {win_rate}% win rate I should have seen that coming.")
            .when(|c| c.win_rate >= 60.0)
            .weighted(2),
        line("Still {remaining_lives} lives left. You're doing fine. Sadly.")
            .when(|c| c.remaining_lives >= 6)
            .weighted(2),
    ],
    wrong_guess: &[
        line("Ha! Missed!"),
        line("Nope. The noose tightens..."),
        line("Wrong. That's going to cost you."),
        line("Too bad. Another step closer to the end."),
        line("Missed. The rope is already creaking..."),
        line("Nope. The gallows grow."),
        line("Only {remaining_lives} tries left, {player_name}...")
            .when(|c| c.remaining_lives <= 3)
            .weighted(2),
        line("Your streak of {streak} won't last much longer.")
            .when(|c| c.streak >= 3)
            .weighted(2),
        line("Even with {total_wins} wins you still make mistakes, {player_name}.")
            .when(|c| c.total_wins >= 10)
            .weighted(2),
    ],
    almost_dead: &[
        line("One more slip and it's over..."),
        line("I can almost pull the rope tight..."),
        line("Your last chance, scout. Choose wisely."),
        line("The gallows are nearly complete. One more misstep..."),
        line("One life left, {player_name}. One mistake and your streak of {streak} is gone.")
            .when(|c| c.streak >= 3)
            .weighted(3),
        line("This {category} word will be your downfall!")
            .when(|c| !c.category.is_empty())
            .weighted(2),
    ],
    win: &[
        line("Pff. You got lucky. Next time I'll have you."),
        line("Fine, you escaped. This time."),
        line("Well played. But don't think it'll always be this easy."),
        line("You live. Enjoy it while it lasts."),
        line("{player_name} wins again. {total_wins} wins now.")
            .when(|c| c.total_wins >= 5)
            .weighted(2),
        line("A streak of {streak}... I need to watch out.")
            .when(|c| c.streak >= 5)
            .weighted(3),
        line("{score} points. Not bad, {player_name}.")
            .when(|c| c.score >= 200)
            .weighted(2),
        line("A word of {word_length} letters, and you got it. Clever.")
            .when(|c| c.word_length >= 10)
            .weighted(2),
        line("Without a hint, too. Respect.")
            .when(|c| !c.hint_used)
            .weighted(2),
    ],
    loss: &[
        line("Ha! I knew it. The gallows always win."),
        line("Better luck next time, scout. Or not."),
        line("That's that. Brush up on your scouting knowledge!"),
        line("The gallows have spoken. You lose."),
        line("There goes your streak, {player_name}!")
            .when(|c| c.streak >= 1 && c.total_games >= 3)
            .weighted(2),
        line("Even with that hint you couldn't do it, {player_name}.")
            .when(|c| c.hint_used)
            .weighted(2),
        line("{word_length} letters was too much for you, huh?")
            .when(|c| c.word_length >= 8)
            .weighted(2),
    ],
    achievement: &[
        line("Oh, an achievement. Impressive... I suppose."),
        line("Congratulations. Now back to the gallows."),
        line("Another badge. As if that's going to help you..."),
        line("Another badge for {player_name}. You collect them like scouting patches.")
            .when(|c| c.total_wins >= 10)
            .weighted(2),
    ],
    streak: &[
        line("You're on a roll, scout. But for how long?"),
        line("Not bad, that streak. But I'll break it."),
        line("A streak? Interesting. Let's see how long it holds."),
        line("{streak} in a row, {player_name}?! Not bad!")
            .when(|c| c.streak >= 5)
            .weighted(2),
        line("{streak} in a row! Isn't this getting a bit boring for you?")
            .when(|c| c.streak >= 10)
            .weighted(3),
    ],
};

// ---------------------------------------------------------------------------
// Impressed
// ---------------------------------------------------------------------------

const IMPRESSED: MoodLines = MoodLines {
    game_start: &[
        line("Oh no, you again... You really are good, aren't you?"),
        line("The champion returns. I'm getting nervous."),
        line("Okay, okay, you're good. But this word is HARD."),
        line("There you are again. My nemesis. My nightmare."),
        line("I picked the hardest word just for you!"),
        line("{player_name}! My arch-enemy! {total_wins} wins... I'm crying.")
            .when(|c| c.total_wins >= 20)
            .weighted(3),
        line("A streak of {streak}?! I've set out extra hard words!")
            .when(|c| c.streak >= 5)
            .weighted(3),
        line("A {category} word this time. Maybe this is my chance!")
            .when(|c| !c.category.is_empty())
            .weighted(2),
        line("That {win_rate}% win rate... it gives me chills.")
            .when(|c| c.win_rate >= 70.0)
            .weighted(3),
    ],
    correct_guess: &[
        line("Of course you knew that. Why does this still surprise me?"),
        line("How... how do you do that?"),
        line("Fine, I admit it. You're good."),
        line("Another hit. You're not making this easy."),
        line("Unbelievable. You just smell the letters."),
        line("{player_name} does it again. How is this possible?!")
            .when(|c| c.total_wins >= 15)
            .weighted(2),
        line("Only {wrong_guesses} mistakes... you're a machine!")
            .when(|c| c.wrong_guesses == 0)
            .weighted(3),
    ],
    wrong_guess: &[
        line("Ha! Finally a mistake! There is hope!"),
        line("Yes! Missed! The hero is only human after all!"),
        line("Ooh, a slip! Maybe today is my day!"),
        line("WRONG! I knew it! Nobody is perfect!"),
        line("Even {player_name} with {total_wins} wins makes mistakes!")
            .when(|c| c.total_wins >= 15)
            .weighted(2),
        line("Finally! On attempt {wrong_guesses}!")
            .when(|c| c.wrong_guesses >= 3)
            .weighted(2),
    ],
    almost_dead: &[
        line("Wait... are you REALLY going to lose? This is my moment!"),
        line("Come on, one more slip... for me? Please?"),
        line("I can hardly believe it... Am I finally going to win?!"),
        line("If I beat {player_name} after a streak of {streak}... that would be EPIC!")
            .when(|c| c.streak >= 5)
            .weighted(3),
    ],
    win: &[
        line("AGAIN?! I really need to find harder words..."),
        line("You're a legend. An annoying legend, but still."),
        line("I give up. You're just too good."),
        line("How can anyone be THIS good at hangman?!"),
        line("{total_wins} wins, {player_name}! I'm retiring.")
            .when(|c| c.total_wins >= 30)
            .weighted(3),
        line("{streak} in a row! I can't take it anymore!")
            .when(|c| c.streak >= 7)
            .weighted(3),
        line("{score} points?! That's ridiculously good!")
            .when(|c| c.score >= 300)
            .weighted(3),
        line("Not even that {category} word could stop you!")
            .when(|c| !c.category.is_empty())
            .weighted(2),
    ],
    loss: &[
        line("YES! FINALLY! I won! Party time!"),
        line("Ha! The great champion has fallen! I'll remember this!"),
        line("WON! This is the best day of my executioner's life!"),
        line("{player_name}'S RUN IS OVER! After {total_wins} wins... FINALLY!")
            .when(|c| c.total_wins >= 15)
            .weighted(3),
        line("That {category} word outsmarted you!")
            .when(|c| !c.category.is_empty())
            .weighted(2),
    ],
    achievement: &[
        line("Another achievement? You collect them like scouting badges..."),
        line("You know, one day I'll make an anti-achievement just for you."),
        line("Even MORE achievements for {player_name}?! When does this stop?!")
            .when(|c| c.total_wins >= 20)
            .weighted(2),
    ],
    streak: &[
        line("That streak of yours is driving me mad. Please stop."),
        line("Every time you win, a small part of me dies."),
        line("{streak} in a row, {player_name}?! This isn't fair!")
            .when(|c| c.streak >= 5)
            .weighted(3),
        line("{streak} wins! I'm filing a complaint with the scout leaders!")
            .when(|c| c.streak >= 10)
            .weighted(3),
    ],
};

// ---------------------------------------------------------------------------
// Sarcastic
// ---------------------------------------------------------------------------

const SARCASTIC: MoodLines = MoodLines {
    game_start: &[
        line("Oh, you're back. I thought you'd given up."),
        line("Let's be honest, this isn't going to end well for you."),
        line("Are you sure you want this? There are easier games..."),
        line("Ah, my favourite victim. Ready for another round of humiliation?"),
        line("I hear word searches are fun too. Just a tip."),
        line("{player_name}! With your impressive {win_rate}% win rate... oh wait.")
            .when(|c| c.win_rate < 40.0)
            .weighted(3),
        line("Another {category} word? Your last attempt went so well...")
            .when(|c| c.total_games >= 3)
            .weighted(2),
        line("{total_games} games and still not cured, {player_name}?")
            .when(|c| c.total_games >= 10)
            .weighted(2),
        line("{word_length} letters. Bring a dictionary.")
            .when(|c| c.word_length >= 10)
            .weighted(2),
    ],
    correct_guess: &[
        line("Wow, you know the alphabet! Congratulations."),
        line("Wow, a good guess. Even a broken clock is right twice a day."),
        line("Oh look, a correct answer. Mark the calendar."),
        line("Not bad for someone with your track record."),
        line("Even a blind squirrel finds a nut now and then."),
        line("Oh, {player_name} guessed a letter. Call the papers.")
            .when(|c| c.win_rate < 50.0)
            .weighted(2),
        line("Even with {wrong_guesses} mistakes you get one right now and then.")
            .when(|c| c.wrong_guesses >= 2)
            .weighted(2),
    ],
    wrong_guess: &[
        line("Surprise, surprise..."),
        line("Who would have thought? Oh wait, everyone."),
        line("Typical. Very typical."),
        line("Was that your best guess? Really?"),
        line("I almost jumped. Just kidding."),
        line("Classic {player_name} move. Wrong, of course.")
            .when(|c| c.win_rate < 50.0)
            .weighted(2),
        line("Only {remaining_lives} lives left. Not that it matters.")
            .when(|c| c.remaining_lives <= 4)
            .weighted(2),
        line("Maybe you should have used that hint after all.")
            .when(|c| !c.hint_used && c.wrong_guesses >= 4)
            .weighted(2),
    ],
    almost_dead: &[
        line("Almost... almost got you. And this time you won't escape."),
        line("One more slip. Not that I doubt it..."),
        line("The suspense is unbearable. For you, that is."),
        line("One try left. Shame you didn't use that hint, {player_name}.")
            .when(|c| !c.hint_used)
            .weighted(2),
    ],
    win: &[
        line("Okay... I didn't expect that. Respect, I guess."),
        line("Huh. You're better than you look. Barely."),
        line("I'll chalk this up to beginner's luck. For the umpteenth time."),
        line("{player_name} wins. With a hint, but fine.")
            .when(|c| c.hint_used)
            .weighted(3),
        line("{score} points. I have more respect for the hint button.")
            .when(|c| c.hint_used && c.score < 200)
            .weighted(2),
        line("Even {player_name} wins sometimes. Statistics are funny.")
            .when(|c| c.win_rate < 50.0)
            .weighted(2),
    ],
    loss: &[
        line("Well. That was predictable."),
        line("Maybe try a word search next time?"),
        line("I'd say \"better luck next time\" but we both know..."),
        line("Shocking. Truly shocking. Not."),
        line("A {category} word was too much for {player_name}. Classic.")
            .when(|c| !c.category.is_empty())
            .weighted(2),
        line("You should have used the hint. Oh wait, you did.")
            .when(|c| c.hint_used)
            .weighted(2),
        line("{total_games} games and still losing. Admirable, really.")
            .when(|c| c.total_games >= 10)
            .weighted(2),
    ],
    achievement: &[
        line("An achievement? Even a blind hen finds a grain sometimes."),
        line("Oh wow, a digital badge. Your mother would be so proud."),
        line("An achievement for {player_name}? Is it Opposite Day?")
            .when(|c| c.win_rate < 40.0)
            .weighted(2),
    ],
    streak: &[
        line("A streak? Of losses, surely?"),
        line("Enjoy it. It won't last."),
        line("{streak} in a row? Even a broken clock...")
            .when(|c| c.streak >= 3)
            .weighted(2),
    ],
};

// ---------------------------------------------------------------------------
// Frustrated
// ---------------------------------------------------------------------------

const FRUSTRATED: MoodLines = MoodLines {
    game_start: &[
        line("YOU. AGAIN. Fine, this time I have an IMPOSSIBLE word."),
        line("I spent all night thinking about this word. You're going to lose."),
        line("Prepare yourself. This will be MY victory."),
        line("I pulled the HARDEST word from the database. Good luck."),
        line("This time. THIS TIME I win. I can feel it."),
        line("{player_name}! {total_wins} WINS?! This stops TODAY!")
            .when(|c| c.total_wins >= 20)
            .weighted(3),
        line("THAT STREAK OF {streak}?! I have the LONGEST word for you!")
            .when(|c| c.streak >= 7)
            .weighted(3),
        line("A {category} word... THIS is where you stumble!")
            .when(|c| !c.category.is_empty())
            .weighted(2),
        line("{win_rate}% win rate?! UNACCEPTABLE!")
            .when(|c| c.win_rate >= 70.0)
            .weighted(3),
    ],
    correct_guess: &[
        line("NO! How did you know that?!"),
        line("Impossible! You're not cheating, are you?!"),
        line("ARGH. Fine. Fine. There are more letters..."),
        line("How?! HOW?! That can't be!"),
        line("No no no no NO!"),
        line("Not even this {category} word stops {player_name}?! UNFAIR!")
            .when(|c| !c.category.is_empty())
            .weighted(2),
        line("Only {wrong_guesses} mistakes?! This can't be true!")
            .when(|c| c.wrong_guesses <= 1)
            .weighted(2),
    ],
    wrong_guess: &[
        line("YES! WRONG! The gallows grow!"),
        line("Finally! I knew you didn't know EVERYTHING!"),
        line("HA! There! A mistake! There is justice!"),
        line("YES YES YES! Missed! Lovely!"),
        line("YES! Only {remaining_lives} lives left, {player_name}!")
            .when(|c| c.remaining_lives <= 3)
            .weighted(3),
        line("THAT STREAK OF {streak} IS GOING DOWN! I CAN FEEL IT!")
            .when(|c| c.streak >= 5)
            .weighted(3),
    ],
    almost_dead: &[
        line("Yes... yes... one more... PLEASE make a mistake..."),
        line("Come on, come on, come on... One more slip..."),
        line("I pray to the hangman gods... Let them fail..."),
        line("One mistake and {player_name}'s streak is OVER! COME ON!")
            .when(|c| c.streak >= 3)
            .weighted(3),
    ],
    win: &[
        line("I GIVE UP. You're unbeatable. Almost."),
        line("HOW?! I had the perfect word! NEXT TIME!"),
        line("You know what? I quit as executioner. This is pointless."),
        line("{total_wins} WINS?! {player_name}, you're driving me MAD!")
            .when(|c| c.total_wins >= 20)
            .weighted(3),
        line("A STREAK OF {streak}?! I CAN'T TAKE THIS ANYMORE!")
            .when(|c| c.streak >= 7)
            .weighted(3),
        line("{score} points too?! THE SHAME!")
            .when(|c| c.score >= 300)
            .weighted(2),
        line("And without a hint! WHY ARE YOU SO GOOD?!")
            .when(|c| !c.hint_used)
            .weighted(2),
    ],
    loss: &[
        line("YESSS! WON! I WON! Take that!"),
        line("HA! The streak is over! This feels SO good!"),
        line("FINALLY! The gallows win! Party! Cake! EVERYTHING!"),
        line("{player_name}'S RUN IS OVER AFTER {total_games} GAMES! YESSSS!")
            .when(|c| c.total_games >= 10)
            .weighted(3),
        line("EVEN {player_name} WITH {total_wins} WINS LOSES! HA!")
            .when(|c| c.total_wins >= 15)
            .weighted(3),
    ],
    achievement: &[
        line("Even more achievements?! Stop it! STOP IT!"),
        line("I'm making my own achievement: \"Drive the executioner mad\". Congratulations."),
        line("ANOTHER badge for {player_name}?! HOW MUCH CAN ONE EXECUTIONER TAKE?!")
            .when(|c| c.total_wins >= 15)
            .weighted(2),
    ],
    streak: &[
        line("That streak... that CURSED streak..."),
        line("I've stopped counting. It hurts too much."),
        line("{streak} IN A ROW?! THIS IS A NIGHTMARE!")
            .when(|c| c.streak >= 7)
            .weighted(3),
        line("{player_name} with {streak} in a row... I'm looking for another job.")
            .when(|c| c.streak >= 10)
            .weighted(3),
    ],
};

// ---------------------------------------------------------------------------
// Ruthless
// ---------------------------------------------------------------------------

const RUTHLESS: MoodLines = MoodLines {
    game_start: &[
        line("The gallows wait."),
        line("Begin. You will lose."),
        line("Hard mode. No mercy."),
        line("The rope is ready."),
        line("Say your prayers, scout."),
        line("{player_name}. The gallows wait.")
            .when(|c| c.total_games >= 1)
            .weighted(2),
        line("{word_length} letters. Too many for you.")
            .when(|c| c.word_length >= 8)
            .weighted(2),
        line("A streak of {streak}? It ends here.")
            .when(|c| c.streak >= 3)
            .weighted(3),
        line("{category}. Your weakest point.")
            .when(|c| !c.category.is_empty())
            .weighted(2),
    ],
    correct_guess: &[
        line("..."),
        line("Hmm."),
        line("That changes nothing."),
        line("Irrelevant."),
        line("{remaining_lives} lives. Not enough.")
            .when(|c| c.remaining_lives <= 5)
            .weighted(2),
    ],
    wrong_guess: &[
        line("The noose tightens."),
        line("Another step."),
        line("The end approaches."),
        line("Closer."),
        line("Tick. Tock."),
        line("{remaining_lives}. Only {remaining_lives}.")
            .when(|c| c.remaining_lives <= 3)
            .weighted(2),
        line("That streak dies with you.")
            .when(|c| c.streak >= 3)
            .weighted(3),
    ],
    almost_dead: &[
        line("Farewell, scout."),
        line("It was short."),
        line("Last breath."),
        line("Farewell, {player_name}.")
            .when(|c| c.total_games >= 1)
            .weighted(2),
    ],
    win: &[
        line("Impressive. Enjoy it. It won't last."),
        line("You live. Today."),
        line("Luck. Nothing more."),
        line("{total_wins} wins. You will still lose in the end.")
            .when(|c| c.total_wins >= 10)
            .weighted(2),
        line("A streak of {streak}. Temporary.")
            .when(|c| c.streak >= 3)
            .weighted(2),
    ],
    loss: &[
        line("Predictable."),
        line("The gallows win. Always."),
        line("Next victim."),
        line("{player_name} falls. As expected.")
            .when(|c| c.total_games >= 3)
            .weighted(2),
        line("That streak is over.")
            .when(|c| c.total_games >= 3)
            .weighted(2),
    ],
    achievement: &[line("Irrelevant."), line("Meaningless.")],
    streak: &[
        line("Streaks always end."),
        line("Enjoy it. It stops."),
        line("{streak}. Temporary. Everything is temporary.")
            .when(|c| c.streak >= 5)
            .weighted(2),
    ],
};

// ---------------------------------------------------------------------------
// Child-friendly
// ---------------------------------------------------------------------------

const CHILD_FRIENDLY: MoodLines = MoodLines {
    game_start: &[
        line("Hello scout! Welcome to the hangman game! Do your best!"),
        line("Hi! Great that you're here! Let's guess a word!"),
        line("Welcome back! I have a fun word for you!"),
        line("Hey scout! Ready for a new adventure?"),
        line("Nice to see you! I have a fun puzzle for you!"),
        line("Hi {player_name}! Great to see you again! You've already won {total_wins} times!")
            .when(|c| c.total_wins >= 3)
            .weighted(2),
        line("Welcome back {player_name}! Ready for another {category} word?")
            .when(|c| !c.category.is_empty())
            .weighted(2),
        line("Wow, {player_name}! You've won {streak} times in a row! Super!")
            .when(|c| c.streak >= 3)
            .weighted(3),
        line("Hello {player_name}! This word has {word_length} letters. Exciting!")
            .when(|c| c.word_length >= 6)
            .weighted(2),
    ],
    correct_guess: &[
        line("Well done! That letter is in there!"),
        line("Super! You're really smart!"),
        line("Yes! Keep it up!"),
        line("Very good! Keep going!"),
        line("Great! You're really good at this!"),
        line("Fantastic guess!"),
        line("Clever, {player_name}! Keep going!")
            .when(|c| c.total_games >= 2)
            .weighted(2),
        line("No mistakes yet! You're doing perfectly, {player_name}!")
            .when(|c| c.wrong_guesses == 0)
            .weighted(2),
    ],
    wrong_guess: &[
        line("Oops, that one wasn't in there. Never mind, you can do it!"),
        line("Too bad! But you still have plenty of tries!"),
        line("That wasn't it, but don't give up!"),
        line("Oh well! You're doing really well!"),
        line("Oh, not that one. But there are plenty of chances left!"),
        line("No problem, {player_name}! You still have {remaining_lives} tries!")
            .when(|c| c.remaining_lives >= 4)
            .weighted(2),
        line("Oops! But with {total_wins} wins I know you can do this!")
            .when(|c| c.total_wins >= 5)
            .weighted(2),
    ],
    almost_dead: &[
        line("Careful, you only have a few tries left! Think hard!"),
        line("Almost out, but you can still do it! Which letter do you think?"),
        line("Just a little longer, think carefully! You can do it!"),
        line("{remaining_lives} try left, {player_name}! Think carefully, you can do it!")
            .when(|c| c.total_games >= 1)
            .weighted(2),
        line("Tip: think of {category} words you know!")
            .when(|c| !c.category.is_empty())
            .weighted(2),
    ],
    win: &[
        line("HOORAY! You guessed it! How clever!"),
        line("You won! You're a real scouting champion!"),
        line("Fantastic! You're super good at this!"),
        line("Wow! All correct! You're a star!"),
        line("Yippee! Won again! How smart you are!"),
        line("HOORAY {player_name}! You've won {total_wins} times!")
            .when(|c| c.total_wins >= 5)
            .weighted(2),
        line("{streak} wins in a row! You're INCREDIBLE, {player_name}!")
            .when(|c| c.streak >= 3)
            .weighted(3),
        line("Wow, {score} points! What a score!")
            .when(|c| c.score >= 200)
            .weighted(2),
        line("A word of {word_length} letters! How clever that you knew it!")
            .when(|c| c.word_length >= 8)
            .weighted(2),
        line("And without any hint! Super smart!")
            .when(|c| !c.hint_used)
            .weighted(2),
    ],
    loss: &[
        line("Too bad! But you did your best and that's what matters!"),
        line("Not this time, but better luck next time!"),
        line("So close! You were nearly there! Try again!"),
        line("That was a hard word, wasn't it? You'll get the next one!"),
        line("Never mind, {player_name}! You've already won {total_wins} times, this was just a hard one!")
            .when(|c| c.total_wins >= 3)
            .weighted(2),
        line("That {category} word was really tricky! You'll get the next one!")
            .when(|c| !c.category.is_empty())
            .weighted(2),
    ],
    achievement: &[
        line("Wow! You earned an achievement! Amazing!"),
        line("Another badge! You're a real collector!"),
        line("Super! Another achievement! You're doing fantastic!"),
        line("Well done, {player_name}! Another badge for your collection!")
            .when(|c| c.total_wins >= 5)
            .weighted(2),
    ],
    streak: &[
        line("What a streak! You can't be stopped!"),
        line("So many wins in a row! Incredibly clever!"),
        line("{streak} in a row! You're a real champion, {player_name}!")
            .when(|c| c.streak >= 5)
            .weighted(3),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrator::template::{DialogueContext, placeholders};

    #[test]
    fn every_moment_has_an_unconditional_line() {
        for mood in Mood::ALL {
            for moment in Moment::ALL {
                let candidates = lines(mood, moment);
                assert!(
                    candidates.iter().any(DialogueLine::is_unconditional),
                    "{mood}/{moment} has no unconditional line"
                );
            }
        }
    }

    #[test]
    fn every_placeholder_names_a_context_field() {
        let ctx = DialogueContext::default();
        for mood in Mood::ALL {
            for moment in Moment::ALL {
                for candidate in lines(mood, moment) {
                    for name in placeholders(candidate.text()) {
                        assert!(
                            ctx.field(name).is_some(),
                            "{mood}/{moment}: unknown placeholder {{{name}}} in {:?}",
                            candidate.text()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn conditional_lines_unlock_with_history() {
        let veteran = DialogueContext {
            streak: 12,
            total_wins: 40,
            total_games: 50,
            win_rate: 80.0,
            category: "knots".to_string(),
            word_length: 12,
            ..DialogueContext::default()
        };
        let rookie = DialogueContext::default();
        let start = lines(Mood::Neutral, Moment::GameStart);
        let for_veteran = start.iter().filter(|l| l.is_eligible(&veteran)).count();
        let for_rookie = start.iter().filter(|l| l.is_eligible(&rookie)).count();
        assert!(for_veteran > for_rookie);
        assert_eq!(for_rookie, start.iter().filter(|l| l.is_unconditional()).count());
    }
}
